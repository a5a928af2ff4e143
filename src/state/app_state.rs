//! Main application state management

use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use super::{Preferences, TimerSnapshot};
use crate::{error::TimerError, services::Reminder, timer::TimerController};

/// Main application state shared by the API handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// The focus timer
    pub timer: TimerController,
    /// Preferences and where to persist them (`None` disables persistence)
    pub preferences: Mutex<Preferences>,
    pub preferences_path: Option<PathBuf>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Most recent reminder delivery failure
    pub last_notification_error: Mutex<Option<String>>,
    /// Reminders, captured in the timer callback and delivered by the reminder task
    pub reminder_tx: mpsc::UnboundedSender<Reminder>,
    /// Channel for status-bar refreshes
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppState {
    /// Create the application state and the receiving end of the reminder channel
    pub fn new(
        port: u16,
        host: String,
        preferences: Preferences,
        preferences_path: Option<PathBuf>,
    ) -> (Self, mpsc::UnboundedReceiver<Reminder>) {
        let (reminder_tx, reminder_rx) = mpsc::unbounded_channel();
        let interval = preferences.interval();
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::idle(interval));

        let state = Self {
            timer: TimerController::with_interval(interval),
            preferences: Mutex::new(preferences),
            preferences_path,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            last_notification_error: Mutex::new(None),
            reminder_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        };
        (state, reminder_rx)
    }

    /// Start the timer; each reminder is forwarded to the reminder task
    pub fn start(&self) -> TimerSnapshot {
        let reminder_tx = self.reminder_tx.clone();
        self.timer.start_with_reading(move |reading| {
            let reminder = Reminder {
                sequence: reading.reminders_fired,
                elapsed: reading.elapsed,
                fired_at: Utc::now(),
            };
            if let Err(e) = reminder_tx.send(reminder) {
                warn!("Failed to forward reminder: {}", e);
            }
        });
        self.after_action("start")
    }

    pub fn pause(&self) -> TimerSnapshot {
        self.timer.pause();
        self.after_action("pause")
    }

    pub fn resume(&self) -> TimerSnapshot {
        self.timer.resume();
        self.after_action("resume")
    }

    pub fn stop(&self) -> TimerSnapshot {
        self.timer.stop();
        self.after_action("stop")
    }

    /// Change the reminder interval and persist it.
    ///
    /// A failure to persist is logged but does not undo the change.
    pub fn set_interval(&self, interval: Duration) -> Result<TimerSnapshot, TimerError> {
        self.timer.set_interval(interval)?;

        let prefs = {
            let mut prefs = lock(&self.preferences);
            prefs.interval_seconds = interval.as_secs();
            prefs.clone()
        };
        if let Some(path) = &self.preferences_path {
            if let Err(e) = prefs.save(path) {
                error!("Failed to persist interval: {}", e);
            }
        }

        Ok(self.after_action("set-interval"))
    }

    fn after_action(&self, action: &str) -> TimerSnapshot {
        *lock(&self.last_action) = Some(action.to_string());
        *lock(&self.last_action_time) = Some(Utc::now());
        self.publish_snapshot()
    }

    /// Capture the timer state and notify status watchers
    pub fn publish_snapshot(&self) -> TimerSnapshot {
        let snapshot = TimerSnapshot::capture(&self.timer);
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
        snapshot
    }

    /// Subscribe to status refreshes
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Record the outcome of a reminder delivery
    pub fn record_notification(&self, result: Result<(), String>) {
        let mut last = lock(&self.last_notification_error);
        match result {
            Ok(()) => *last = None,
            Err(e) => {
                warn!("Reminder delivery failed: {}", e);
                *last = Some(e);
            }
        }
    }

    pub fn get_last_notification_error(&self) -> Option<String> {
        lock(&self.last_notification_error).clone()
    }

    pub fn get_preferences(&self) -> Preferences {
        lock(&self.preferences).clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = lock(&self.last_action).clone();
        let last_action_time = *lock(&self.last_action_time);
        (last_action, last_action_time)
    }

    /// Stop the timer on shutdown
    pub fn shutdown(&self) {
        if self.timer.is_active() {
            info!("Stopping active timer for shutdown");
            self.stop();
        }
    }
}
