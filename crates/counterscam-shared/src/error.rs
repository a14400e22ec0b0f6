use thiserror::Error;

use crate::types::ScanKind;

/// Local input rejections. These never reach the network layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a {kind} to check")]
    Empty { kind: ScanKind },

    #[error("{kind} is too short: {len} characters (minimum {min})")]
    TooShort { kind: ScanKind, len: usize, min: usize },
}

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown scan kind: {0}")]
    UnknownKind(String),

    #[error("Unknown verdict: {0}")]
    UnknownVerdict(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
