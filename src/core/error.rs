// SPDX-License-Identifier: MIT OR Apache-2.0

//! EventFlux CEP Error Types
//!
//! Errors surfaced by pattern compilation and compiler configuration.

use thiserror::Error;

use crate::core::validation::PatternValidationError;

/// Result type for CEP compiler operations
pub type CepResult<T> = Result<T, CepError>;

/// CEP compiler error types
#[derive(Error, Debug)]
pub enum CepError {
    /// The pattern chain breaks a structural rule; the whole pattern is rejected.
    #[error("Malformed pattern: {source}")]
    MalformedPattern {
        #[from]
        source: PatternValidationError,
    },

    /// A compiled automaton broke one of its invariants. Always a compiler bug.
    #[error("Internal consistency fault: {message}")]
    InternalConsistencyFault { message: String },

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        config_key: Option<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CepError {
    /// Create an internal consistency fault
    pub fn internal_consistency(message: impl Into<String>) -> Self {
        Self::InternalConsistencyFault {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: None,
        }
    }

    /// Create a configuration error with a specific key
    pub fn configuration_with_key(message: impl Into<String>, config_key: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: Some(config_key.into()),
        }
    }

    /// Name of the offending pattern element, for malformed patterns
    pub fn pattern_name(&self) -> Option<&str> {
        match self {
            CepError::MalformedPattern { source } => Some(source.pattern_name()),
            _ => None,
        }
    }
}
