//! Engine-specific error types

use shared::{JobState, SharedError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("{what} not found: {id}")]
    NotFound { what: String, id: String },

    #[error("Scenario {scenario_id} already has an active job: {job_id}")]
    Conflict { scenario_id: String, job_id: String },

    #[error("Analysis execution failed: {reason}")]
    ExecutionFailure { reason: String },

    #[error("Work queue is full (capacity {capacity})")]
    Busy { capacity: usize },

    #[error("Analysis of scenario {scenario_id} timed out after {after:?}")]
    Timeout { scenario_id: String, after: Duration },

    #[error("Illegal job transition: {from} -> {to}")]
    InvalidTransition { from: JobState, to: JobState },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Result store error: {message}")]
    Storage { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Caller-facing classification of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    NotFound,
    Conflict,
    ExecutionFailure,
    Busy,
}

impl EngineError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest { reason: reason.into() }
    }

    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    pub fn not_found(what: &str, id: impl ToString) -> Self {
        Self::NotFound {
            what: what.to_string(),
            id: id.to_string(),
        }
    }

    pub fn execution(reason: impl Into<String>) -> Self {
        Self::ExecutionFailure { reason: reason.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidRequest { .. }
            | EngineError::ConfigurationError { .. }
            | EngineError::SharedError(SharedError::InvalidScenario { .. })
            | EngineError::SharedError(SharedError::DeserializationError { .. })
            | EngineError::SharedError(SharedError::InvalidUuid { .. })
            | EngineError::JsonError(_) => ErrorKind::InvalidRequest,
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::Conflict { .. } => ErrorKind::Conflict,
            EngineError::Busy { .. } => ErrorKind::Busy,
            EngineError::ExecutionFailure { .. }
            | EngineError::Timeout { .. }
            | EngineError::InvalidTransition { .. }
            | EngineError::Storage { .. }
            | EngineError::SharedError(SharedError::SerializationError { .. })
            | EngineError::IoError(_) => ErrorKind::ExecutionFailure,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
