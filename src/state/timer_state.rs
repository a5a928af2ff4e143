//! Read-only timer snapshot published to the UI layer

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

use crate::timer::{status_text, status_title, Scheduler, TimerController, TimerPhase, TimerReading};

/// Timer state as shown in the status bar and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub interval_seconds: u64,
    pub elapsed_seconds: u64,
    pub remaining_seconds: Option<u64>,
    pub reminders_fired: u64,
    /// Status line, e.g. `Paused (00:00:04)`
    pub elapsed_text: String,
    /// Status-bar title, e.g. `▶ 00:12:34`
    pub title: String,
}

impl TimerSnapshot {
    /// Create an idle snapshot for the given interval
    pub fn idle(interval: Duration) -> Self {
        Self::from(TimerReading {
            phase: TimerPhase::Idle,
            interval,
            elapsed: Duration::ZERO,
            remaining: None,
            reminders_fired: 0,
        })
    }

    /// Capture the controller's current state
    pub fn capture<S: Scheduler>(timer: &TimerController<S>) -> Self {
        Self::from(timer.read_at(Instant::now()))
    }

    /// Check if the timer is running or paused
    pub fn is_active(&self) -> bool {
        self.phase != TimerPhase::Idle
    }
}

impl From<TimerReading> for TimerSnapshot {
    fn from(reading: TimerReading) -> Self {
        Self {
            phase: reading.phase,
            interval_seconds: reading.interval.as_secs(),
            elapsed_seconds: reading.elapsed.as_secs(),
            remaining_seconds: reading.remaining.map(|r| r.as_secs()),
            reminders_fired: reading.reminders_fired,
            elapsed_text: status_text(reading.phase, reading.elapsed),
            title: status_title(reading.phase, reading.elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_snapshot_has_placeholders() {
        let snapshot = TimerSnapshot::idle(Duration::from_secs(1800));
        assert!(!snapshot.is_active());
        assert_eq!(snapshot.interval_seconds, 1800);
        assert_eq!(snapshot.remaining_seconds, None);
        assert_eq!(snapshot.elapsed_text, "Not running");
        assert_eq!(snapshot.title, "⏹ 00:00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn capture_reflects_paused_timer() {
        let timer = TimerController::with_interval(Duration::from_secs(10));
        timer.start(|| {});
        tokio::time::sleep(Duration::from_secs(4)).await;
        timer.pause();

        let snapshot = TimerSnapshot::capture(&timer);
        assert_eq!(snapshot.phase, TimerPhase::Paused);
        assert_eq!(snapshot.elapsed_seconds, 4);
        assert_eq!(snapshot.elapsed_text, "Paused (00:00:04)");
        assert!(snapshot.is_active());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "paused");
    }
}
