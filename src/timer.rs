//! Single-threaded timer queue on a virtual clock.
//!
//! Callers own [`TimerId`] handles and cancel them on state transitions.
//! Cancelling twice, or cancelling a timer that already fired, does nothing.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Entry<E> {
    due: Duration,
    id: TimerId,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.id == other.id
    }
}

impl<E> Eq for Entry<E> {}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on the deadline; ties fire in scheduling order.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct Timers<E> {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Entry<E>>,
    live: HashSet<TimerId>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Timers::new()
    }
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Timers {
            now: Duration::ZERO,
            next_id: 0,
            queue: BinaryHeap::new(),
            live: HashSet::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arms a one-shot timer firing `after` from the current instant.
    pub fn schedule(&mut self, after: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);
        self.queue.push(Entry {
            due: self.now + after,
            id,
            event,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.live.remove(&id);
    }

    /// Cancels and clears a handle slot, if it holds one.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id)
    }

    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Pops the earliest live timer due at or before `until`, moving the clock to
    /// its deadline. Once nothing else is due the clock settles on `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, E)> {
        while let Some(entry) = self.queue.peek() {
            if entry.due > until {
                break;
            }
            let entry = self.queue.pop()?;
            if self.live.remove(&entry.id) {
                self.now = self.now.max(entry.due);
                return Some((entry.id, entry.event));
            }
        }
        self.now = self.now.max(until);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = Timers::new();
        timers.schedule(ms(30), "c");
        timers.schedule(ms(10), "a");
        timers.schedule(ms(20), "b");
        let mut fired = Vec::new();
        while let Some((_, event)) = timers.pop_due(ms(100)) {
            fired.push((event, timers.now()));
        }
        assert_eq!(fired, vec![("a", ms(10)), ("b", ms(20)), ("c", ms(30))]);
        assert_eq!(timers.now(), ms(100));
    }

    #[test]
    fn ties_fire_in_schedule_order() {
        let mut timers = Timers::new();
        timers.schedule(ms(5), 1);
        timers.schedule(ms(5), 2);
        assert_eq!(timers.pop_due(ms(5)).map(|(_, e)| e), Some(1));
        assert_eq!(timers.pop_due(ms(5)).map(|(_, e)| e), Some(2));
    }

    #[test]
    fn not_due_yet() {
        let mut timers = Timers::new();
        timers.schedule(ms(50), ());
        assert!(timers.pop_due(ms(49)).is_none());
        assert_eq!(timers.now(), ms(49));
        assert!(timers.pop_due(ms(50)).is_some());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timers = Timers::new();
        let id = timers.schedule(ms(5), ());
        timers.cancel(id);
        timers.cancel(id);
        assert!(!timers.is_pending(id));
        assert!(timers.pop_due(ms(10)).is_none());

        let mut empty = None;
        timers.cancel_slot(&mut empty);

        let fired = timers.schedule(ms(1), ());
        assert!(timers.pop_due(ms(20)).is_some());
        timers.cancel(fired);
        assert_eq!(timers.pending(), 0);
    }
}
