// SPDX-License-Identifier: PMPL-1.0-or-later

//! Debug channel for non-fatal store conditions.
//!
//! Nothing is printed or kept unless the channel was built enabled. The
//! history holds the most recent [`HISTORY_LIMIT`] entries.

use crate::types::DebugLevel;
use colored::*;
use std::cell::RefCell;
use std::collections::VecDeque;

pub const HISTORY_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugEntry {
    pub level: DebugLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DebugChannel {
    enabled: bool,
    entries: RefCell<VecDeque<DebugEntry>>,
}

impl DebugChannel {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: RefCell::new(VecDeque::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn report(&self, level: DebugLevel, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let entry = DebugEntry {
            level,
            message: message.into(),
        };
        entry.print();
        let mut entries = self.entries.borrow_mut();
        if entries.len() == HISTORY_LIMIT {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.report(DebugLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.report(DebugLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.report(DebugLevel::Error, message);
    }

    /// Snapshot of the recorded history, oldest first.
    pub fn entries(&self) -> Vec<DebugEntry> {
        self.entries.borrow().iter().cloned().collect()
    }

    /// Take the recorded entries, leaving the history empty.
    pub fn drain(&self) -> Vec<DebugEntry> {
        self.entries.borrow_mut().drain(..).collect()
    }

    pub fn count(&self, level: DebugLevel) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }
}

impl DebugEntry {
    fn print(&self) {
        let tag = format!("[{}]", self.level.tag());
        let tag = match self.level {
            DebugLevel::Info => tag.cyan(),
            DebugLevel::Warning => tag.yellow(),
            DebugLevel::Error => tag.red().bold(),
        };
        eprintln!("{} {}", tag, self.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_channel_records_nothing() {
        let channel = DebugChannel::new(false);
        channel.error("ignored");
        assert!(channel.entries().is_empty());
    }

    #[test]
    fn enabled_channel_records_in_order() {
        let channel = DebugChannel::new(true);
        channel.info("one");
        channel.error("two");
        channel.warning("three");

        let levels: Vec<DebugLevel> = channel.entries().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![DebugLevel::Info, DebugLevel::Error, DebugLevel::Warning]
        );
        assert_eq!(channel.count(DebugLevel::Error), 1);
    }

    #[test]
    fn history_keeps_only_recent_entries() {
        let channel = DebugChannel::new(true);
        for i in 0..HISTORY_LIMIT + 10 {
            channel.info(format!("miss {i}"));
        }

        let entries = channel.entries();
        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert_eq!(entries[0].message, "miss 10");
        assert_eq!(
            entries[HISTORY_LIMIT - 1].message,
            format!("miss {}", HISTORY_LIMIT + 9)
        );
    }

    #[test]
    fn drain_empties_history() {
        let channel = DebugChannel::new(true);
        channel.error("one");
        channel.warning("two");

        assert_eq!(channel.drain().len(), 2);
        assert!(channel.entries().is_empty());
        channel.info("three");
        assert_eq!(channel.entries().len(), 1);
    }
}
