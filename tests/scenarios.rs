//! End-to-end timer scenarios on simulated tokio time

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;

use focus_bell::{TimerController, TimerError, TimerPhase};

fn counting_callback() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    (count, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn reminder_fires_once_per_interval() {
    let timer = TimerController::with_interval(Duration::from_secs(10));
    let (ticks, on_tick) = counting_callback();
    timer.start(on_tick);

    sleep(Duration::from_millis(9_990)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);

    sleep(Duration::from_millis(20)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
    assert_eq!(timer.formatted_elapsed(), "00:00:10");

    let remaining = timer.remaining_until_next_reminder().expect("running");
    assert!(remaining <= Duration::from_secs(10));
    assert!(remaining >= Duration::from_millis(9_900));

    sleep(Duration::from_secs(10)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn pause_keeps_progress_toward_next_reminder() {
    let timer = TimerController::with_interval(Duration::from_secs(10));
    let (ticks, on_tick) = counting_callback();
    timer.start(on_tick);

    sleep(Duration::from_secs(4)).await;
    timer.pause();
    assert_eq!(timer.elapsed_text(), "Paused (00:00:04)");
    let remaining = timer.remaining_until_next_reminder().expect("paused");
    assert!(remaining <= Duration::from_secs(6));
    assert!(remaining >= Duration::from_millis(5_990));

    // Nothing fires and nothing accrues while paused.
    sleep(Duration::from_secs(300)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);
    assert_eq!(timer.elapsed_text(), "Paused (00:00:04)");

    timer.resume();
    sleep(Duration::from_millis(5_900)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);
    sleep(Duration::from_millis(200)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
    assert_eq!(timer.formatted_elapsed(), "00:00:10");
}

#[tokio::test(start_paused = true)]
async fn interval_changes_only_apply_while_idle() {
    let timer = TimerController::with_interval(Duration::from_secs(600));
    assert_eq!(timer.set_interval(Duration::from_secs(1800)), Ok(()));

    let (ticks, on_tick) = counting_callback();
    timer.start(on_tick);
    assert_eq!(
        timer.set_interval(Duration::from_secs(60)),
        Err(TimerError::Active)
    );

    sleep(Duration::from_secs(61)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);
    sleep(Duration::from_secs(1800 - 61) + Duration::from_millis(10)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_double_start_keeps_single_schedule() {
    let timer = TimerController::with_interval(Duration::from_secs(10));
    let (ticks, on_tick) = counting_callback();
    let (ignored, second) = counting_callback();

    timer.start(on_tick);
    timer.start(second);
    assert_eq!(timer.phase(), TimerPhase::Running);

    sleep(Duration::from_millis(30_500)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
    assert_eq!(ignored.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_pending_reminder() {
    let timer = TimerController::with_interval(Duration::from_secs(10));
    let (ticks, on_tick) = counting_callback();
    timer.start(on_tick);

    sleep(Duration::from_secs(9)).await;
    timer.stop();
    timer.stop();
    sleep(Duration::from_secs(60)).await;

    assert_eq!(ticks.load(Ordering::SeqCst), 0);
    assert_eq!(timer.phase(), TimerPhase::Idle);
    assert_eq!(timer.elapsed_text(), "Not running");
}
