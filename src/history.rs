use log::{debug, trace, warn};
use std::collections::VecDeque;

use crate::location::{Location, NavigationType, DEFAULT_KEY};

/// Only matters when the app is never reloaded (long-lived desktop shell).
/// Switching between top-level sections goes through regular navigation, so
/// it looks like going deeper and the log would otherwise keep growing.
pub const MAX_DEPTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub key: String,
    pub path: String,
}

impl From<&Location> for HistoryEntry {
    fn from(location: &Location) -> Self {
        Self {
            key: location.key.clone(),
            path: location.path(),
        }
    }
}

pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_size: usize,
}

impl History {
    pub fn new(initial: HistoryEntry) -> Self {
        let mut entries = VecDeque::with_capacity(MAX_DEPTH);
        entries.push_back(initial);
        Self {
            entries,
            max_size: MAX_DEPTH,
        }
    }

    /// Applies one navigation to the log. Returns `false` when the log was
    /// left untouched.
    pub fn record(&mut self, entry: HistoryEntry, action: NavigationType) -> bool {
        // The runtime reports the initial location once more as an implicit
        // POP. Only take it if the path has since gained its query string.
        if entry.key == DEFAULT_KEY && self.entries.len() == 1 {
            if self.entries[0].path == entry.path {
                trace!("Ignoring initial location echo for {}", entry.path);
                return false;
            }
            debug!("Initial location resolved to {}", entry.path);
            self.entries[0] = entry;
            return true;
        }

        debug!("{} {} ({})", action, entry.path, entry.key);
        match action {
            NavigationType::Push => self.entries.push_back(entry),
            NavigationType::Replace => {
                self.entries.pop_back();
                self.entries.push_back(entry);
            }
            NavigationType::Pop => {
                match self.entries.iter().position(|e| e.key == entry.key) {
                    Some(index) => self.entries.truncate(index + 1),
                    None => self.entries.push_back(entry),
                }
            }
        }

        let overflow = self.entries.len().saturating_sub(self.max_size);
        if overflow > 0 {
            warn!("History exceeded {} entries, dropping {} oldest", self.max_size, overflow);
            self.entries.drain(..overflow);
        }

        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Where a "back" action would lead, if anywhere.
    pub fn previous_path(&self) -> Option<&str> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        self.entries.get(len - 2).map(|e| e.path.as_str())
    }
}
