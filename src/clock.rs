use parking_lot::Mutex;
use std::{
    cell::Cell,
    sync::Arc,
    time::{Duration, Instant},
};

/// Source of the current instant for refill arithmetic.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<F> Clock for F
where
    F: Fn() -> Instant,
{
    fn now(&self) -> Instant {
        self()
    }
}

/// Wall clock, the default for every bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Settable clock. Clones share the same instant, so one handle can drive
/// several buckets through a common timeline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self { now: Arc::new(Mutex::new(start)) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    pub fn set(&self, to: Instant) {
        *self.now.lock() = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Replays a fixed list of instants, one per call.
///
/// After the last scripted instant the clock stays put at it, so extra calls
/// see no elapsed time. An empty script pins the clock at the instant it was
/// built.
#[derive(Debug)]
pub struct ScriptedClock {
    times: Vec<Instant>,
    next: Cell<usize>,
    fallback: Instant,
}

impl ScriptedClock {
    pub fn new(times: Vec<Instant>) -> Self {
        let fallback = times.last().copied().unwrap_or_else(Instant::now);
        Self { times, next: Cell::new(0), fallback }
    }

    /// Starts at `start` and pushes each following instant further out by the
    /// matching duration.
    pub fn starting_at(start: Instant, steps: &[Duration]) -> Self {
        let mut times = Vec::with_capacity(steps.len() + 1);
        times.push(start);
        let mut at = start;
        for step in steps {
            at += *step;
            times.push(at);
        }
        Self::new(times)
    }

    /// Scripted instants not handed out yet.
    pub fn remaining(&self) -> usize {
        self.times.len().saturating_sub(self.next.get())
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> Instant {
        let i = self.next.get();
        match self.times.get(i) {
            Some(t) => {
                self.next.set(i + 1);
                *t
            }
            None => self.fallback,
        }
    }
}
