//! Repeating display-refresh loop
//!
//! The loop is a small state machine over a host [`Scheduler`]: it owns at
//! most one pending handle at a time, so `start`, `stop` and `restart` are
//! idempotent and never leave two timers running.

use std::time::Duration;

use tracing::{debug, trace, warn};

/// Fastest allowed cadence
pub const MIN_REFRESH_MS: u32 = 10;
/// Slowest allowed cadence
pub const MAX_REFRESH_MS: u32 = 1000;
/// Cadence used when nothing is configured or persisted (0.01 s per tick)
pub const DEFAULT_REFRESH_MS: u32 = 10;

/// Clamp a requested refresh rate into the supported range
pub fn clamp_refresh_ms(ms: u32) -> u32 {
    ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS)
}

/// One-shot timer facility of the host environment
pub trait Scheduler {
    type Handle;

    /// Arrange for the host to call back after `delay`. `None` if the host
    /// refused to schedule.
    fn schedule(&mut self, delay: Duration) -> Option<Self::Handle>;

    /// Cancel a pending callback. Cancelling a fired handle is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Cooperative repeating task: schedule, fire, reschedule
pub struct RefreshLoop<S: Scheduler> {
    scheduler: S,
    rate_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> RefreshLoop<S> {
    pub fn new(scheduler: S, rate_ms: u32) -> Self {
        Self {
            scheduler,
            rate_ms: clamp_refresh_ms(rate_ms),
            pending: None,
        }
    }

    /// Current cadence in milliseconds
    pub fn rate_ms(&self) -> u32 {
        self.rate_ms
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Start the loop. The first tick is scheduled immediately; a loop that
    /// is already running is rescheduled, not duplicated.
    pub fn start(&mut self) {
        self.cancel_pending();
        self.pending = self.scheduler.schedule(Duration::ZERO);
        if self.pending.is_none() {
            warn!(rate_ms = self.rate_ms, "Host refused to schedule refresh tick");
        } else {
            debug!(rate_ms = self.rate_ms, "Refresh loop started");
        }
    }

    /// Stop the loop. No tick fires until the next `start`.
    pub fn stop(&mut self) {
        if self.cancel_pending() {
            debug!("Refresh loop stopped");
        }
    }

    /// Change cadence and start again at the new rate.
    pub fn restart(&mut self, rate_ms: u32) {
        self.rate_ms = clamp_refresh_ms(rate_ms);
        self.start();
    }

    /// Called when the pending timer elapses. Returns `true` if the caller
    /// should render a tick; the next tick is already scheduled by then.
    pub fn fire(&mut self) -> bool {
        if self.pending.take().is_none() {
            trace!("Ignoring tick of a stopped refresh loop");
            return false;
        }
        self.pending = self
            .scheduler
            .schedule(Duration::from_millis(self.rate_ms as u64));
        if self.pending.is_none() {
            warn!(rate_ms = self.rate_ms, "Host refused to schedule refresh tick");
        }
        true
    }

    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }
}

/// Deadline scheduler for frame-driven hosts: the render loop asks whether
/// the pending tick is due instead of receiving a callback.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    /// (handle, due time in monotonic seconds)
    deadline: Option<(u64, f64)>,
    now: f64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the scheduler's notion of monotonic time
    pub fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    /// Whether a pending tick has reached its deadline
    pub fn is_due(&self) -> bool {
        matches!(self.deadline, Some((_, due)) if self.now >= due)
    }

    /// Time left until the pending tick, `None` when nothing is scheduled
    pub fn time_until_due(&self) -> Option<Duration> {
        self.deadline
            .map(|(_, due)| Duration::from_secs_f64((due - self.now).max(0.0)))
    }
}

impl Scheduler for FrameScheduler {
    type Handle = u64;

    fn schedule(&mut self, delay: Duration) -> Option<u64> {
        self.next_id += 1;
        self.deadline = Some((self.next_id, self.now + delay.as_secs_f64()));
        Some(self.next_id)
    }

    fn cancel(&mut self, handle: u64) {
        if matches!(self.deadline, Some((id, _)) if id == handle) {
            self.deadline = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ManualScheduler, SchedulerCall};

    #[test]
    fn test_rate_is_clamped() {
        let lp = RefreshLoop::new(ManualScheduler::default(), 0);
        assert_eq!(lp.rate_ms(), MIN_REFRESH_MS);
        let lp = RefreshLoop::new(ManualScheduler::default(), 60_000);
        assert_eq!(lp.rate_ms(), MAX_REFRESH_MS);
    }

    #[test]
    fn test_start_schedules_immediate_tick() {
        let mut lp = RefreshLoop::new(ManualScheduler::default(), 50);
        lp.start();
        assert!(lp.is_running());
        assert_eq!(
            *lp.scheduler().calls.borrow(),
            vec![SchedulerCall::Schedule(1, Duration::ZERO)]
        );
    }

    #[test]
    fn test_fire_reschedules_at_rate() {
        let mut lp = RefreshLoop::new(ManualScheduler::default(), 50);
        lp.start();
        assert!(lp.fire());
        assert!(lp.fire());
        let calls = lp.scheduler().calls.borrow().clone();
        assert_eq!(
            calls,
            vec![
                SchedulerCall::Schedule(1, Duration::ZERO),
                SchedulerCall::Schedule(2, Duration::from_millis(50)),
                SchedulerCall::Schedule(3, Duration::from_millis(50)),
            ]
        );
    }

    #[test]
    fn test_restart_never_double_schedules() {
        let mut lp = RefreshLoop::new(ManualScheduler::default(), 50);
        lp.start();
        lp.restart(100);
        lp.start();
        assert_eq!(lp.scheduler().outstanding(), vec![3]);
        assert_eq!(lp.rate_ms(), 100);
    }

    #[test]
    fn test_stop_prevents_further_ticks() {
        let mut lp = RefreshLoop::new(ManualScheduler::default(), 50);
        lp.start();
        lp.stop();
        assert!(!lp.is_running());
        assert!(!lp.fire());
        assert!(lp.scheduler().outstanding().is_empty());

        // Stopping twice is harmless
        lp.stop();
        assert_eq!(
            lp.scheduler().calls.borrow().last(),
            Some(&SchedulerCall::Cancel(1))
        );
    }

    #[test]
    fn test_refused_schedule_leaves_loop_stopped() {
        let mut lp = RefreshLoop::new(ManualScheduler::refusing(), 50);
        lp.start();
        assert!(!lp.is_running());
        assert!(!lp.fire());
    }

    #[test]
    fn test_frame_scheduler_deadlines() {
        let mut lp = RefreshLoop::new(FrameScheduler::new(), 100);
        lp.scheduler_mut().set_now(5.0);
        lp.start();
        assert!(lp.scheduler().is_due());
        assert!(lp.fire());

        // Next tick is 100 ms out
        assert!(!lp.scheduler().is_due());
        let left = lp.scheduler().time_until_due().unwrap();
        assert!((left.as_secs_f64() - 0.1).abs() < 1e-9);

        lp.scheduler_mut().set_now(5.2);
        assert!(lp.scheduler().is_due());

        lp.stop();
        assert!(!lp.scheduler().is_due());
        assert_eq!(lp.scheduler().time_until_due(), None);
    }

    #[test]
    fn test_frame_scheduler_ignores_stale_cancel() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.schedule(Duration::from_millis(10)).unwrap();
        let second = scheduler.schedule(Duration::from_millis(10)).unwrap();
        scheduler.cancel(first);
        assert!(scheduler.time_until_due().is_some());
        scheduler.cancel(second);
        assert!(scheduler.time_until_due().is_none());
    }
}
