//! # counterscam-shared
//!
//! Types shared by every CounterScam crate: the service wire contracts,
//! the canonical scan/history model, input validation, and the verdict
//! classifier.

pub mod classifier;
pub mod constants;
pub mod error;
pub mod protocol;
pub mod types;

pub use classifier::{classify, Classification, DetectionSignal};
pub use error::{SharedError, ValidationError};
pub use types::{
    validate_payload, EntryId, HistoryEntry, ScanKind, ScanOutcome, ScanRequest, Tone, Verdict,
    VerdictBasis,
};
