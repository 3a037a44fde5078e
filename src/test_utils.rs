//! Shared fakes for unit tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::core::host::Host;
use crate::core::refresh::Scheduler;
use crate::time::Clock;

/// Host reporting fixed values
#[derive(Clone, Debug, Default)]
pub struct StaticHost {
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub prefers_dark: bool,
}

impl Host for StaticHost {
    fn timezone_id(&self) -> Option<String> {
        self.timezone.clone()
    }

    fn preferred_language(&self) -> Option<String> {
        self.language.clone()
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}

/// Clock frozen at a settable instant
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Rc<Self> {
        Rc::new(Self { now: Cell::new(now) })
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Build a UTC instant from calendar components
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// Scheduler call as recorded by [`ManualScheduler`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerCall {
    Schedule(u64, Duration),
    Cancel(u64),
}

/// Scheduler that only records calls; tests fire ticks by hand
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pub calls: Rc<RefCell<Vec<SchedulerCall>>>,
    pub refuse: bool,
}

impl ManualScheduler {
    /// Scheduler whose host rejects every timer
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Handles scheduled and not yet cancelled, in call order
    pub fn outstanding(&self) -> Vec<u64> {
        let calls = self.calls.borrow();
        let mut live = Vec::new();
        for call in calls.iter() {
            match call {
                SchedulerCall::Schedule(id, _) => live.push(*id),
                SchedulerCall::Cancel(id) => live.retain(|h| h != id),
            }
        }
        live
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&mut self, delay: Duration) -> Option<u64> {
        if self.refuse {
            return None;
        }
        self.next += 1;
        self.calls
            .borrow_mut()
            .push(SchedulerCall::Schedule(self.next, delay));
        Some(self.next)
    }

    fn cancel(&mut self, handle: u64) {
        self.calls.borrow_mut().push(SchedulerCall::Cancel(handle));
    }
}
