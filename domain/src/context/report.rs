//! Serializable snapshots of a context tree, for external viewers.

use super::log::{ErrorRecord, Log, LogKind};
use super::node::{Context, ContextEntry, ContextStatus, UserContext};
use crate::util::duration_millis;
use serde::Serialize;
use serde_json::Value;

/// Snapshot of a context and its subtree. Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextReport {
    pub id: String,
    pub title: String,
    pub status: ContextStatus,
    pub start_timestamp_ms: f64,
    pub elapsed_ms: Option<f64>,
    pub user_context: UserContext,
    pub children: Vec<EntryReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entry", rename_all = "lowercase")]
pub enum EntryReport {
    Context(ContextReport),
    Log(LogReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogReport {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub text: String,
    pub timestamp_ms: f64,
    pub data: Option<Value>,
    pub error: Option<ErrorRecord>,
}

impl ContextReport {
    pub fn from_context(context: &Context) -> Self {
        Self {
            id: context.id().to_string(),
            title: context.title().to_string(),
            status: context.status(),
            start_timestamp_ms: duration_millis(context.start_timestamp()),
            elapsed_ms: context.elapsed().map(duration_millis),
            user_context: context.user_context().clone(),
            children: context
                .children()
                .iter()
                .map(|child| match child {
                    ContextEntry::Context(context) => {
                        EntryReport::Context(ContextReport::from_context(context))
                    }
                    ContextEntry::Log(log) => EntryReport::Log(LogReport::from_log(log)),
                })
                .collect(),
        }
    }
}

impl LogReport {
    pub fn from_log(log: &Log) -> Self {
        Self {
            id: log.id().to_string(),
            kind: log.kind(),
            text: log.text().to_string(),
            timestamp_ms: duration_millis(log.timestamp()),
            data: log.data().cloned(),
            error: log.error().cloned(),
        }
    }
}
