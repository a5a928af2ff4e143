//! Once-per-second status refresh

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, trace};

use crate::state::AppState;

/// How often the status-bar title is refreshed
pub const REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// Background task that polls the timer and publishes a fresh snapshot.
///
/// Only reads the timer; never changes its state.
pub async fn status_refresh_task(state: Arc<AppState>) {
    info!("Starting status refresh task");

    let mut interval = interval(REFRESH_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let snapshot = state.publish_snapshot();
        trace!("Status: {} ({})", snapshot.title, snapshot.elapsed_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::Preferences, timer::TimerPhase};
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn publishes_live_elapsed_time() {
        let (state, _rx) = AppState::new(0, "127.0.0.1".into(), Preferences::new(), None);
        let state = Arc::new(state);
        let mut watcher = state.subscribe();
        tokio::spawn(status_refresh_task(Arc::clone(&state)));

        state.start();
        sleep(Duration::from_millis(3_500)).await;

        let snapshot = watcher.borrow_and_update().clone();
        assert_eq!(snapshot.phase, TimerPhase::Running);
        assert_eq!(snapshot.title, "▶ 00:00:03");
        assert!(state.timer.is_running());
    }
}
