//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod reminder;
pub mod status_refresh;

// Re-export main functions
pub use reminder::reminder_task;
pub use status_refresh::status_refresh_task;
