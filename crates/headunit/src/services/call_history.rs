//! Call History - Bounded, most-recent-first log of finished calls

use std::collections::VecDeque;

use crate::domain::CallRecord;

/// Default number of retained history entries
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Append-only call log; the oldest entries fall off past `capacity`
#[derive(Debug, Clone)]
pub struct CallHistoryLog {
    entries: VecDeque<CallRecord>,
    capacity: usize,
}

impl CallHistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Seed with entries already ordered most-recent-first
    pub fn with_entries(capacity: usize, entries: impl IntoIterator<Item = CallRecord>) -> Self {
        let mut entries: VecDeque<CallRecord> = entries.into_iter().collect();
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Prepend a record, dropping the oldest on overflow
    pub fn record(&mut self, entry: CallRecord) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// All retained records, most recent first
    pub fn query(&self) -> Vec<CallRecord> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CallHistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CallOutcome;
    use chrono::{Duration, TimeZone, Utc};

    fn record(n: usize) -> CallRecord {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + Duration::minutes(n as i64);
        CallRecord::new(
            format!("+1555000{:04}", n),
            None,
            start,
            start + Duration::seconds(30),
            30,
            CallOutcome::Outgoing,
        )
    }

    #[test]
    fn test_retains_latest_fifty_most_recent_first() {
        let mut log = CallHistoryLog::default();
        for n in 0..60 {
            log.record(record(n));
        }

        let entries = log.query();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].number, record(59).number);
        assert_eq!(entries[49].number, record(10).number);
        assert!(entries
            .windows(2)
            .all(|pair| pair[0].start_time > pair[1].start_time));
    }

    #[test]
    fn test_seed_is_truncated_to_capacity() {
        let log = CallHistoryLog::with_entries(2, (0..5).rev().map(record));
        assert_eq!(log.len(), 2);
        assert_eq!(log.capacity(), 2);
        assert_eq!(log.query()[0].number, record(4).number);
    }

    #[test]
    fn test_empty_log() {
        let log = CallHistoryLog::default();
        assert!(log.is_empty());
        assert!(log.query().is_empty());
    }
}
