use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tracing::Level;

/// One tracing event captured for the logs screen.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Bounded in-memory log store shared between the tracing layer and the
/// logs screen. Oldest entries are evicted once the cap is reached.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl LogBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.write().unwrap();
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of the buffer, oldest first.
    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.read().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: chrono::Local::now(),
            level: Level::INFO,
            target: "optifuel::test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let buffer = LogBuffer::new(2);
        assert!(buffer.is_empty());

        buffer.push(entry("one"));
        buffer.push(entry("two"));
        buffer.push(entry("three"));

        assert_eq!(buffer.len(), 2);
        let entries = buffer.get_entries();
        assert_eq!(entries[0].message, "two");
        assert_eq!(entries[1].message, "three");
    }
}
