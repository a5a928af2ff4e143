//! State management module
//!
//! This module contains the shared application state, the timer snapshot
//! published to the UI layer, and persisted preferences.

pub mod app_state;
pub mod preferences;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use preferences::{
    default_preferences_path, parse_interval_input, validate_interval_seconds, Preferences,
};
pub use timer_state::TimerSnapshot;
