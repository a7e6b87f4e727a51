use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of entries retained for display.
pub const EVENT_LOG_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Reset,
    PhaseChange,
    BirdStrike,
    CushionDeployed,
    Touchdown,
    Crash,
    Stopped,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Simulation time of the event (s).
    pub time: f64,
    pub kind: EventKind,
    pub message: String,
}

/// Bounded, append-only record of simulation events for the presentation layer.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Appends an entry, evicting the oldest once full.
    pub fn push(&mut self, time: f64, kind: EventKind, message: impl Into<String>) {
        let message = message.into();
        debug!("[{:>7.2}s] {:?}: {}", time, kind, message);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            time,
            kind,
            message,
        });
    }

    /// Clears the log down to the reset sentinel.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.push(0.0, EventKind::Reset, "Simulation reset");
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    pub fn find(&self, kind: EventKind) -> Option<&LogEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
