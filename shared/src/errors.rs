//! Shared error types for the scenario analysis engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharedError {
    #[error("Invalid scenario field {field}: {reason}")]
    InvalidScenario { field: String, reason: String },

    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid UUID: {input}")]
    InvalidUuid { input: String },
}

impl SharedError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidScenario {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
