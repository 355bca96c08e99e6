//! Domain error types

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors that can be recorded by a scoped child context.
///
/// `data` is the payload attached to the error, stored on the resulting
/// error log entry.
pub trait ScopedError: fmt::Display + fmt::Debug {
    fn data(&self) -> Option<Value> {
        None
    }
}

/// Application error carrying an optional JSON payload.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TraceError {
    pub message: String,
    pub data: Option<Value>,
}

impl TraceError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ScopedError for TraceError {
    fn data(&self) -> Option<Value> {
        self.data.clone()
    }
}

impl ScopedError for anyhow::Error {
    fn data(&self) -> Option<Value> {
        self.downcast_ref::<TraceError>().and_then(ScopedError::data)
    }
}

impl ScopedError for std::io::Error {}

impl ScopedError for Box<dyn std::error::Error + Send + Sync> {
    fn data(&self) -> Option<Value> {
        self.downcast_ref::<TraceError>().and_then(ScopedError::data)
    }
}

impl ScopedError for String {}
