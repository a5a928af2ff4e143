//! External collaborators
//!
//! This module contains reminder delivery (sound and banner) and the platform
//! command helpers it is built on.

pub mod notifier;
pub mod system;

// Re-export main types
pub use notifier::{DesktopNotifier, LogNotifier, Notifier, Reminder};
pub use system::{check_tool_available, run_command};
