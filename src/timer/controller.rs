//! Focus timer state machine
//!
//! The controller owns every piece of temporal state: the reminder interval,
//! the running/paused/idle phase, accumulated elapsed time and the deadline of
//! the next reminder. Reminders are single-shot registrations on a
//! [`Scheduler`]; each fire re-arms the next one before invoking the callback.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::{
    format::{format_hms, status_text, IDLE_ELAPSED},
    scheduler::{Scheduler, TickHandle, TokioScheduler},
    TimerPhase,
};
use crate::error::TimerError;

/// Smallest delay ever handed to the scheduler
pub const MIN_REMINDER_DELAY: Duration = Duration::from_secs(1);

/// Largest accepted reminder interval (24 hours)
pub const MAX_REMINDER_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Callback invoked on every reminder tick with the reading taken at fire time
pub type TickCallback = Arc<dyn Fn(TimerReading) + Send + Sync>;

/// Consistent view of the timer taken under a single lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerReading {
    pub phase: TimerPhase,
    pub interval: Duration,
    pub elapsed: Duration,
    pub remaining: Option<Duration>,
    pub reminders_fired: u64,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Running { run_start: Instant, deadline: Instant },
    Paused { remaining: Duration },
}

struct Inner {
    interval: Duration,
    phase: Phase,
    accumulated: Duration,
    /// Identifies the currently armed tick; bumped on every arm and cancel
    generation: u64,
    pending: Option<TickHandle>,
    on_tick: Option<TickCallback>,
    reminders_fired: u64,
}

impl Inner {
    fn cancel_pending(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

/// Single focus timer driven by a [`Scheduler`].
///
/// Cloning yields another handle to the same timer. Every operation is a
/// no-op when called from a phase where it does not apply.
pub struct TimerController<S: Scheduler = TokioScheduler> {
    inner: Arc<Mutex<Inner>>,
    scheduler: Arc<S>,
}

impl<S: Scheduler> Clone for TimerController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            scheduler: Arc::clone(&self.scheduler),
        }
    }
}

impl<S: Scheduler> std::fmt::Debug for TimerController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("TimerController")
            .field("interval", &inner.interval)
            .field("phase", &inner.phase)
            .field("accumulated", &inner.accumulated)
            .finish()
    }
}

impl TimerController<TokioScheduler> {
    /// Create an idle timer backed by tokio timers
    pub fn with_interval(interval: Duration) -> Self {
        Self::new(interval, TokioScheduler::new())
    }
}

impl<S: Scheduler> TimerController<S> {
    /// Create an idle timer. The interval is clamped to
    /// [`MIN_REMINDER_DELAY`]..=[`MAX_REMINDER_INTERVAL`].
    pub fn new(interval: Duration, scheduler: S) -> Self {
        let clamped = interval.clamp(MIN_REMINDER_DELAY, MAX_REMINDER_INTERVAL);
        if clamped != interval {
            warn!("Reminder interval {:?} clamped to {:?}", interval, clamped);
        }
        let interval = clamped;

        Self {
            inner: Arc::new(Mutex::new(Inner {
                interval,
                phase: Phase::Idle,
                accumulated: Duration::ZERO,
                generation: 0,
                pending: None,
                on_tick: None,
                reminders_fired: 0,
            })),
            scheduler: Arc::new(scheduler),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start counting from zero and schedule the first reminder one interval out
    pub fn start<F>(&self, on_tick: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.start_with_reading(move |_| on_tick());
    }

    /// Like [`start`](Self::start), but the callback receives the timer
    /// reading captured when the reminder fired
    pub fn start_with_reading<F>(&self, on_tick: F)
    where
        F: Fn(TimerReading) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        if !matches!(inner.phase, Phase::Idle) {
            debug!("Ignoring start: timer is {:?}", TimerPhase::from(&inner.phase));
            return;
        }

        let now = Instant::now();
        let interval = inner.interval;
        let Some(deadline) = deadline_after(now, interval) else {
            warn!("Cannot schedule a reminder {:?} from now, timer not started", interval);
            return;
        };

        inner.accumulated = Duration::ZERO;
        inner.reminders_fired = 0;
        inner.on_tick = Some(Arc::new(on_tick));
        inner.phase = Phase::Running {
            run_start: now,
            deadline,
        };
        self.arm(&mut inner, now, deadline);

        info!("Timer started, reminding every {}", format_hms(interval));
    }

    /// Freeze elapsed time and remember how long was left until the next reminder
    pub fn pause(&self) {
        let mut inner = self.lock();
        let Phase::Running { run_start, deadline } = inner.phase else {
            debug!("Ignoring pause: timer is {:?}", TimerPhase::from(&inner.phase));
            return;
        };

        let now = Instant::now();
        inner.cancel_pending();
        inner.accumulated += now.saturating_duration_since(run_start);
        let remaining = deadline
            .saturating_duration_since(now)
            .max(MIN_REMINDER_DELAY);
        inner.phase = Phase::Paused { remaining };

        info!(
            "Timer paused at {}, next reminder in {}",
            format_hms(inner.accumulated),
            format_hms(remaining)
        );
    }

    /// Continue counting; the next reminder fires after the time left at pause
    pub fn resume(&self) {
        let mut inner = self.lock();
        let Phase::Paused { remaining } = inner.phase else {
            debug!("Ignoring resume: timer is {:?}", TimerPhase::from(&inner.phase));
            return;
        };

        let now = Instant::now();
        let Some(deadline) = deadline_after(now, remaining) else {
            warn!("Cannot schedule a reminder {:?} from now, timer stays paused", remaining);
            return;
        };

        inner.phase = Phase::Running {
            run_start: now,
            deadline,
        };
        self.arm(&mut inner, now, deadline);

        info!("Timer resumed, next reminder in {}", format_hms(remaining));
    }

    /// Cancel any pending reminder and reset to idle
    pub fn stop(&self) {
        let mut inner = self.lock();
        if matches!(inner.phase, Phase::Idle) {
            debug!("Ignoring stop: timer is already idle");
            return;
        }

        inner.cancel_pending();
        let total = match inner.phase {
            Phase::Running { run_start, .. } => {
                inner.accumulated + Instant::now().saturating_duration_since(run_start)
            }
            _ => inner.accumulated,
        };
        inner.phase = Phase::Idle;
        inner.accumulated = Duration::ZERO;
        inner.on_tick = None;
        inner.reminders_fired = 0;

        info!("Timer stopped after {}", format_hms(total));
    }

    /// Change the reminder period used by the next [`start`](Self::start).
    ///
    /// Rejected while the timer is running or paused.
    pub fn set_interval(&self, interval: Duration) -> Result<(), TimerError> {
        if interval.is_zero() || interval > MAX_REMINDER_INTERVAL {
            return Err(TimerError::InvalidInterval);
        }

        let mut inner = self.lock();
        if !matches!(inner.phase, Phase::Idle) {
            debug!("Rejecting interval change while timer is active");
            return Err(TimerError::Active);
        }

        inner.interval = interval;
        info!("Reminder interval set to {}", format_hms(interval));
        Ok(())
    }

    /// Register the next single-shot reminder for `deadline`, which callers
    /// compute with [`deadline_after`] before touching any state
    fn arm(&self, inner: &mut Inner, now: Instant, deadline: Instant) {
        let delay = deadline.saturating_duration_since(now);
        if let Phase::Running { deadline: armed, .. } = &mut inner.phase {
            *armed = deadline;
        }

        inner.cancel_pending();
        let generation = inner.generation;
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let scheduler = Arc::clone(&self.scheduler);

        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    TimerController { inner, scheduler }.fire(generation);
                }
            }),
        );
        inner.pending = Some(handle);
    }

    /// Handle a scheduler fire for the tick armed as `generation`
    fn fire(&self, generation: u64) {
        let callback = {
            let mut inner = self.lock();
            if inner.generation != generation {
                debug!("Discarding stale reminder tick");
                return;
            }
            let Phase::Running { deadline, .. } = inner.phase else {
                debug!("Discarding reminder tick: timer is not running");
                return;
            };

            // The handle that just fired is spent.
            inner.pending = None;

            let now = Instant::now();
            let interval = inner.interval;
            // Anchor on the previous deadline so late wakeups do not drift;
            // fall back to `now` when that is already due.
            let next = deadline
                .checked_add(interval)
                .filter(|anchored| anchored.saturating_duration_since(now) > MIN_REMINDER_DELAY)
                .or_else(|| deadline_after(now, interval));
            match next {
                Some(next) => self.arm(&mut inner, now, next),
                None => warn!("Cannot schedule the next reminder {:?} from now", interval),
            }
            inner.reminders_fired += 1;

            let reading = read_at(&inner, now);
            info!(
                "Reminder #{} after {}",
                reading.reminders_fired,
                format_hms(reading.elapsed)
            );
            inner.on_tick.clone().map(|callback| (callback, reading))
        };

        if let Some((callback, reading)) = callback {
            callback(reading);
        }
    }

    pub fn phase(&self) -> TimerPhase {
        TimerPhase::from(&self.lock().phase)
    }

    /// Running or paused
    pub fn is_active(&self) -> bool {
        !matches!(self.lock().phase, Phase::Idle)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.lock().phase, Phase::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.lock().phase, Phase::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.lock().phase, Phase::Paused { .. })
    }

    pub fn interval(&self) -> Duration {
        self.lock().interval
    }

    /// Reminders delivered since the last start
    pub fn reminders_fired(&self) -> u64 {
        self.lock().reminders_fired
    }

    /// Total running time since the last start, excluding paused spans
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Elapsed time as observed at `now`
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        elapsed_at(&self.lock(), now)
    }

    /// Time left until the next reminder; `None` while idle
    pub fn remaining_until_next_reminder(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        remaining_at(&self.lock(), now)
    }

    /// Read every query at once, as observed at `now`
    pub fn read_at(&self, now: Instant) -> TimerReading {
        read_at(&self.lock(), now)
    }

    /// Elapsed time as `HH:MM:SS`; `00:00:00` while idle
    pub fn formatted_elapsed(&self) -> String {
        let now = Instant::now();
        let inner = self.lock();
        match inner.phase {
            Phase::Idle => IDLE_ELAPSED.to_string(),
            _ => format_hms(elapsed_at(&inner, now)),
        }
    }

    /// Status line such as `Paused (00:00:04)` or `Not running`
    pub fn elapsed_text(&self) -> String {
        let now = Instant::now();
        let inner = self.lock();
        status_text(TimerPhase::from(&inner.phase), elapsed_at(&inner, now))
    }
}

fn elapsed_at(inner: &Inner, now: Instant) -> Duration {
    match inner.phase {
        Phase::Running { run_start, .. } => {
            inner.accumulated + now.saturating_duration_since(run_start)
        }
        Phase::Paused { .. } => inner.accumulated,
        Phase::Idle => Duration::ZERO,
    }
}

/// Deadline `delay` after `now`, floored to [`MIN_REMINDER_DELAY`];
/// `None` if it cannot be represented
fn deadline_after(now: Instant, delay: Duration) -> Option<Instant> {
    now.checked_add(delay.max(MIN_REMINDER_DELAY))
}

fn read_at(inner: &Inner, now: Instant) -> TimerReading {
    TimerReading {
        phase: TimerPhase::from(&inner.phase),
        interval: inner.interval,
        elapsed: elapsed_at(inner, now),
        remaining: remaining_at(inner, now),
        reminders_fired: inner.reminders_fired,
    }
}

fn remaining_at(inner: &Inner, now: Instant) -> Option<Duration> {
    match inner.phase {
        Phase::Idle => None,
        Phase::Running { deadline, .. } => Some(deadline.saturating_duration_since(now)),
        Phase::Paused { remaining } => Some(remaining),
    }
}

impl From<&Phase> for TimerPhase {
    fn from(phase: &Phase) -> Self {
        match phase {
            Phase::Idle => TimerPhase::Idle,
            Phase::Running { .. } => TimerPhase::Running,
            Phase::Paused { .. } => TimerPhase::Paused,
        }
    }
}
