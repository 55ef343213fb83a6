//! Repeating timers on a virtual clock.
//!
//! The clock only moves when the owner advances it (usually by the frame delta), so timers are
//! deterministic in tests and never fire behind the owner's back. Each logical timer is
//! identified by a caller-chosen key; re-arming a key replaces the previous instance and hands
//! out a fresh [`TimerId`].

use std::fmt::Debug;
use std::time::Duration;

use tracing::debug;

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// One due firing of a repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing<K> {
    pub key: K,
    pub id: TimerId,
    /// Virtual time at which the firing was due.
    pub at: Duration,
}

#[derive(Debug, Clone)]
struct Interval<K> {
    key: K,
    id: TimerId,
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: Duration,
    next_id: u64,
    intervals: Vec<Interval<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            intervals: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Debug> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Starts a repeating timer for `key`, cancelling any instance already armed for it.
    ///
    /// The first firing is due one `period` after the current virtual time.
    pub fn arm(&mut self, key: K, period: Duration) -> TimerId {
        self.cancel(key);

        let period = period.max(MIN_PERIOD);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.intervals.push(Interval {
            key,
            id,
            period,
            next_due: self.now.saturating_add(period),
        });
        debug!(?key, ?id, ?period, "timer armed");
        id
    }

    /// Cancels the live instance for `key`, returning its id if one was armed.
    pub fn cancel(&mut self, key: K) -> Option<TimerId> {
        let pos = self.intervals.iter().position(|t| t.key == key)?;
        let removed = self.intervals.remove(pos);
        debug!(?key, id = ?removed.id, "timer cancelled");
        Some(removed.id)
    }

    /// Cancels a specific instance. Stale ids (already cancelled or replaced) are a no-op.
    pub fn cancel_id(&mut self, id: TimerId) -> bool {
        let Some(pos) = self.intervals.iter().position(|t| t.id == id) else {
            return false;
        };
        let removed = self.intervals.remove(pos);
        debug!(key = ?removed.key, ?id, "timer cancelled");
        true
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.intervals.len();
        if count > 0 {
            debug!(count, "all timers cancelled");
        }
        self.intervals.clear();
        count
    }

    pub fn active_id(&self, key: K) -> Option<TimerId> {
        self.intervals.iter().find(|t| t.key == key).map(|t| t.id)
    }

    pub fn is_live(&self, id: TimerId) -> bool {
        self.intervals.iter().any(|t| t.id == id)
    }

    pub fn armed_count(&self) -> usize {
        self.intervals.len()
    }

    /// Pops the earliest firing due at or before `until`, moving the clock to its due time.
    ///
    /// Callers react to each firing before asking for the next one, so a reaction that re-arms
    /// or cancels a timer is honored for the rest of the window. Finish the window with
    /// [`Scheduler::settle`].
    pub fn next_due(&mut self, until: Duration) -> Option<Firing<K>> {
        let idx = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, t)| t.next_due <= until)
            .min_by_key(|(_, t)| (t.next_due, t.id))
            .map(|(idx, _)| idx)?;

        let interval = &mut self.intervals[idx];
        let at = interval.next_due;
        interval.next_due = at.saturating_add(interval.period);
        self.now = self.now.max(at);

        Some(Firing {
            key: interval.key,
            id: interval.id,
            at,
        })
    }

    /// Moves the clock forward to `until` without firing anything.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
