//! Focus timer core
//!
//! This module contains the timer state machine, the scheduler abstraction it
//! is driven by, and elapsed-time formatting.

pub mod controller;
pub mod format;
pub mod scheduler;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use controller::{TickCallback, TimerController, TimerReading, MAX_REMINDER_INTERVAL, MIN_REMINDER_DELAY};
pub use format::{format_hms, status_text, status_title};
pub use scheduler::{ScheduledTask, Scheduler, TickHandle, TokioScheduler};

/// Observable phase of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        }
    }
}
