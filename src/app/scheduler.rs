//! Abbrechbare Timer-Abstraktion fuer das kooperative Event-Loop-Modell.
//!
//! Es gibt keinen eigenen Thread: der Host pumpt die Queue mit seiner
//! monotonen Uhr (`Instant`), faellige Aufgaben werden zurueckgegeben
//! und vom Aufrufer ausgefuehrt. Jede Planung liefert ein Handle, mit
//! dem die Aufgabe vor Ablauf storniert werden kann.

use std::time::{Duration, Instant};

/// Handle einer geplanten Aufgabe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct TimerEntry<T> {
    handle: TimerHandle,
    due: Instant,
    task: T,
}

/// Zeitgesteuerte Aufgaben-Queue ohne eigenen Thread.
pub struct TimerQueue<T> {
    next_handle: u64,
    entries: Vec<TimerEntry<T>>,
}

impl<T> TimerQueue<T> {
    /// Erstellt eine leere Queue.
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            entries: Vec::new(),
        }
    }

    /// Plant eine Aufgabe `delay` nach `now` ein.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.entries.push(TimerEntry {
            handle,
            due: now + delay,
            task,
        });
        handle
    }

    /// Storniert eine geplante Aufgabe. `false` wenn sie schon lief oder storniert war.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() < before
    }

    /// Verwirft alle geplanten Aufgaben (Teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Gibt alle faelligen Aufgaben in Faelligkeits-Reihenfolge zurueck.
    ///
    /// Bei gleicher Faelligkeit entscheidet die Planungs-Reihenfolge —
    /// das haelt die Ausfuehrung deterministisch.
    pub fn pump(&mut self, now: Instant) -> Vec<T> {
        let mut due: Vec<TimerEntry<T>> = Vec::new();
        let mut remaining: Vec<TimerEntry<T>> = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.entries = remaining;
        due.sort_by_key(|e| (e.due, e.handle.0));
        due.into_iter().map(|e| e.task).collect()
    }

    /// Gibt die Anzahl offener Aufgaben zurueck.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurueck, wenn keine Aufgaben offen sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Naechster Faelligkeits-Zeitpunkt, falls Aufgaben offen sind.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_returns_only_due_tasks() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now, Duration::from_millis(100), "a");
        queue.schedule(now, Duration::from_millis(300), "b");

        let due = queue.pump(now + Duration::from_millis(150));

        assert_eq!(due, vec!["a"]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn canceled_task_never_fires() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(now, Duration::from_millis(100), "a");

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));

        let due = queue.pump(now + Duration::from_secs(1));
        assert!(due.is_empty());
    }

    #[test]
    fn due_tasks_fire_in_due_order() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now, Duration::from_millis(300), "later");
        queue.schedule(now, Duration::from_millis(100), "sooner");

        let due = queue.pump(now + Duration::from_secs(1));

        assert_eq!(due, vec!["sooner", "later"]);
    }

    #[test]
    fn equal_due_times_keep_schedule_order() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now, Duration::from_millis(100), "first");
        queue.schedule(now, Duration::from_millis(100), "second");

        let due = queue.pump(now + Duration::from_millis(100));

        assert_eq!(due, vec!["first", "second"]);
    }

    #[test]
    fn clear_drops_everything() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now, Duration::from_millis(10), "a");
        queue.schedule(now, Duration::from_millis(20), "b");

        queue.clear();

        assert!(queue.is_empty());
        assert!(queue.next_due().is_none());
    }
}
