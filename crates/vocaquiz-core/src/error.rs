//! Error types for the quiz engine.
//!
//! Only programming and I/O failures are errors here. Missing or corrupt
//! progress data is recovered locally by the progress store and never
//! reaches these types.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::QuizState;

/// Errors raised while loading a word catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A TOML catalog did not parse.
    #[error("failed to parse TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors raised when an action does not fit the current session state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The action is not accepted in this state.
    #[error("cannot {action} while in state {state}")]
    InvalidAction {
        action: &'static str,
        state: QuizState,
    },

    /// An option number outside the offered list.
    #[error("option {index} is out of range ({available} available)")]
    OptionOutOfRange { index: usize, available: usize },

    /// The set has no word at the current position.
    #[error("no question at position {index}")]
    MissingQuestion { index: usize },
}

impl SessionError {
    pub(crate) fn invalid(action: &'static str, state: QuizState) -> Self {
        SessionError::InvalidAction { action, state }
    }
}

/// Errors from a key-value persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O failure in the backing storage.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}
