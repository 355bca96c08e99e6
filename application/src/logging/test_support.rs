//! Recording backend for tests.

use contextlog_domain::util::lock_or_recover;
use contextlog_domain::{Backend, Level, LoggerContext, MessageArg, prepare_message};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recorded {
    pub level: Level,
    pub path: String,
    pub message: String,
}

pub(crate) struct RecordingBackend {
    id: String,
    records: Mutex<Vec<Recorded>>,
}

impl RecordingBackend {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<Recorded> {
        lock_or_recover(&self.records).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl Backend for RecordingBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn log(&self, level: Level, message: &str, args: &[MessageArg<'_>], context: &LoggerContext) {
        let prepared = prepare_message(message, args);
        lock_or_recover(&self.records).push(Recorded {
            level,
            path: context.path.clone(),
            message: prepared.message,
        });
    }
}
