//! Reminder delivery background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    services::{Notifier, Reminder},
    state::AppState,
};

/// Background task that delivers reminders captured by the timer callback.
///
/// Delivery runs here rather than in the timer callback so that a slow sound
/// or banner never holds up the next reminder.
pub async fn reminder_task<N: Notifier>(
    state: Arc<AppState>,
    notifier: N,
    mut reminders: mpsc::UnboundedReceiver<Reminder>,
) {
    info!("Starting reminder task");

    while let Some(reminder) = reminders.recv().await {
        debug!("Reminder task received reminder #{}", reminder.sequence);

        let result = notifier.notify(&reminder).await.map_err(|e| e.to_string());
        state.record_notification(result);
    }

    info!("Reminder channel closed, reminder task exiting");
}
