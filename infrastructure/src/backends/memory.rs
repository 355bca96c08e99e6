//! In-memory backend for tests and in-app log panels.

use contextlog_domain::util::lock_or_recover;
use contextlog_domain::{Backend, Level, LoggerContext, MessageArg, prepare_message};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// One admitted call, with its message already prepared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryRecord {
    pub level: Level,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dump_values: Vec<Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

/// Keeps every admitted call, optionally bounded to the most recent `capacity`.
pub struct MemoryBackend {
    id: String,
    capacity: Option<usize>,
    records: Mutex<Vec<MemoryRecord>>,
}

impl MemoryBackend {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capacity: None,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Drop the oldest records beyond `capacity`.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn records(&self) -> Vec<MemoryRecord> {
        lock_or_recover(&self.records).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        lock_or_recover(&self.records)
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return every record.
    pub fn drain(&self) -> Vec<MemoryRecord> {
        std::mem::take(&mut *lock_or_recover(&self.records))
    }
}

impl Backend for MemoryBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn log(&self, level: Level, message: &str, args: &[MessageArg<'_>], context: &LoggerContext) {
        let prepared = prepare_message(message, args);
        let record = MemoryRecord {
            level,
            path: context.path.clone(),
            message: prepared.message,
            dump_values: prepared.dump_values,
            fields: context.fields.clone(),
        };

        let mut records = lock_or_recover(&self.records);
        records.push(record);
        if let Some(capacity) = self.capacity
            && records.len() > capacity
        {
            let overflow = records.len() - capacity;
            records.drain(..overflow);
        }
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("records", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_prepared_calls() {
        let backend = MemoryBackend::new("memory");
        let context = LoggerContext::new("/app").with_field("tenant", "acme");
        backend.log(
            Level::Notice,
            "saved {0}",
            &["doc".into(), MessageArg::value(json!({"size": 3})).dump()],
            &context,
        );

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "saved doc");
        assert_eq!(records[0].dump_values, vec![json!({"size": 3})]);
        assert_eq!(records[0].fields.get("tenant").map(String::as_str), Some("acme"));
    }

    #[test]
    fn test_capacity_keeps_most_recent() {
        let backend = MemoryBackend::new("memory").with_capacity(2);
        let context = LoggerContext::new("/a");
        for message in ["one", "two", "three"] {
            backend.log(Level::Info, message, &[], &context);
        }
        assert_eq!(backend.messages(), vec!["two", "three"]);
    }

    #[test]
    fn test_drain_empties() {
        let backend = MemoryBackend::new("memory");
        backend.log(Level::Error, "x", &[], &LoggerContext::new("/a"));
        assert_eq!(backend.drain().len(), 1);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_record_serializes_level_lowercase() {
        let record = MemoryRecord {
            level: Level::Warning,
            path: "/a".into(),
            message: "m".into(),
            dump_values: Vec::new(),
            fields: BTreeMap::new(),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"level": "warning", "path": "/a", "message": "m"})
        );
    }
}
