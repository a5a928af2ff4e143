//! Focus Bell - a focus timer with periodic reminders
//!
//! This library provides the timer state machine that tracks running, paused
//! and idle phases, plus the collaborators around it: reminder delivery,
//! persisted preferences and an HTTP control surface.

pub mod config;
pub mod error;
pub mod state;
pub mod timer;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{NotifyError, PreferencesError, TimerError};
pub use state::{AppState, Preferences, TimerSnapshot};
pub use timer::{TimerController, TimerPhase};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
