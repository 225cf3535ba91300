// User-visible log model
use crate::domain::history::BoundedHistory;
use serde::Serialize;
use std::fmt;

pub const LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    pub fn new(timestamp: String, message: String, severity: Severity) -> Self {
        Self {
            timestamp,
            message,
            severity,
        }
    }
}

/// Capped log panel contents. `appended` counts every push ever made so a
/// display can tell which entries it has not shown yet.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: BoundedHistory<LogEntry>,
    appended: u64,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BoundedHistory::new(capacity),
            appended: 0,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        self.appended += 1;
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn appended(&self) -> u64 {
        self.appended
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize) -> LogEntry {
        LogEntry::new("12:00:00".to_string(), format!("msg {i}"), Severity::Info)
    }

    #[test]
    fn test_log_is_capped_at_one_hundred() {
        let mut log = LogBuffer::default();
        for i in 0..101 {
            log.push(entry(i));
            assert!(log.len() <= LOG_CAPACITY);
        }
        assert_eq!(log.len(), 100);
        assert_eq!(log.entries().next().map(|e| e.message.as_str()), Some("msg 1"));
        assert_eq!(log.appended(), 101);
    }

    #[test]
    fn test_clear_keeps_append_counter() {
        let mut log = LogBuffer::new(5);
        log.push(entry(0));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.appended(), 1);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
