use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    MIN_MESSAGE_LEN, MIN_URL_LEN, PATH_CHECK_MESSAGE, PATH_CHECK_URL, REASONS_SEPARATOR,
};
use crate::error::{SharedError, ValidationError};

/// What a scan (or a report) is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Url,
    Message,
}

impl ScanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Message => "message",
        }
    }

    /// Detection endpoint for this kind of payload.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Url => PATH_CHECK_URL,
            Self::Message => PATH_CHECK_MESSAGE,
        }
    }

    /// Minimum trimmed payload length accepted for a scan.
    pub fn min_len(&self) -> usize {
        match self {
            Self::Url => MIN_URL_LEN,
            Self::Message => MIN_MESSAGE_LEN,
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "message" => Ok(Self::Message),
            other => Err(SharedError::UnknownKind(other.to_string())),
        }
    }
}

/// Canonical three-way classification of a scanned item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Suspicious,
    Phishing,
}

/// Display tone associated with a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Warning,
    Danger,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Suspicious => "suspicious",
            Self::Phishing => "phishing",
        }
    }

    /// Capitalized label, as shown on a verdict pill.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Suspicious => "Suspicious",
            Self::Phishing => "Phishing",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Safe => Tone::Ok,
            Self::Suspicious => Tone::Warning,
            Self::Phishing => Tone::Danger,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = SharedError;

    /// Strict parse of a stored label. Use the classifier for service data.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(Self::Safe),
            "suspicious" => Ok(Self::Suspicious),
            "phishing" => Ok(Self::Phishing),
            other => Err(SharedError::UnknownVerdict(other.to_string())),
        }
    }
}

/// Which rule of the classifier produced a verdict.
///
/// `Defaulted` means the service said nothing usable and the verdict is a
/// display fallback, not a confirmation that the item is safe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerdictBasis {
    /// A string `verdict` field was present.
    Reported,
    /// Only the legacy boolean `flagged` field was present.
    LegacyFlag,
    /// Neither field was present.
    Defaulted,
}

/// User input for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub kind: ScanKind,
    pub payload: String,
}

impl ScanRequest {
    /// Build a request, trimming the payload. Validation is separate.
    pub fn new(kind: ScanKind, payload: impl AsRef<str>) -> Self {
        Self {
            kind,
            payload: payload.as_ref().trim().to_string(),
        }
    }

    pub fn url(payload: impl AsRef<str>) -> Self {
        Self::new(ScanKind::Url, payload)
    }

    pub fn message(payload: impl AsRef<str>) -> Self {
        Self::new(ScanKind::Message, payload)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_payload(self.kind, &self.payload, self.kind.min_len())
    }
}

/// Check a trimmed payload against a minimum character count.
pub fn validate_payload(kind: ScanKind, payload: &str, min: usize) -> Result<(), ValidationError> {
    let len = payload.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::Empty { kind });
    }
    if len < min {
        return Err(ValidationError::TooShort { kind, len, min });
    }
    Ok(())
}

/// Canonical result of a scan after classification.
///
/// This is the only shape that travels past the service boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanOutcome {
    pub kind: ScanKind,
    /// The scanned string, as submitted.
    pub value: String,
    pub verdict: Verdict,
    pub basis: VerdictBasis,
    pub risk_score: f64,
    pub reasons: Vec<String>,
    pub confidence: Option<f64>,
}

impl ScanOutcome {
    /// True when the verdict is backed by data from the service.
    pub fn is_confirmed(&self) -> bool {
        self.basis != VerdictBasis::Defaulted
    }

    pub fn reasons_line(&self) -> String {
        self.reasons.join(REASONS_SEPARATOR)
    }
}

/// Identifier of a history entry. UUIDv7, so it embeds its creation time
/// and sorts by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A locally retained record of one past scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ScanKind,
    pub value: String,
    pub verdict: Verdict,
    pub risk_score: f64,
    pub reasons: Vec<String>,
}

impl HistoryEntry {
    /// Stamp an outcome with a fresh id and the current time.
    pub fn from_outcome(outcome: &ScanOutcome) -> Self {
        Self {
            id: EntryId::new(),
            created_at: Utc::now(),
            kind: outcome.kind,
            value: outcome.value.clone(),
            verdict: outcome.verdict,
            risk_score: outcome.risk_score,
            reasons: outcome.reasons.clone(),
        }
    }

    pub fn reasons_line(&self) -> String {
        self.reasons.join(REASONS_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_payload() {
        let req = ScanRequest::url("   http://example.com  \n");
        assert_eq!(req.payload, "http://example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_payload_rejected() {
        let req = ScanRequest::message("   ");
        assert_eq!(
            req.validate(),
            Err(ValidationError::Empty {
                kind: ScanKind::Message
            })
        );
    }

    #[test]
    fn test_short_payloads_rejected() {
        assert!(matches!(
            ScanRequest::url("a.io").validate(),
            Err(ValidationError::TooShort { len: 4, min: 7, .. })
        ));
        assert!(ScanRequest::url("abc.xyz").validate().is_ok());
        assert!(ScanRequest::message("too short").validate().is_err());
        assert!(ScanRequest::message("long enough").validate().is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 10 characters, more than 10 bytes
        assert!(ScanRequest::message("ééééééééé!").validate().is_ok());
    }

    #[test]
    fn test_kind_parse_and_endpoint() {
        assert_eq!("URL".parse::<ScanKind>().unwrap(), ScanKind::Url);
        assert_eq!(ScanKind::Message.endpoint(), "/check_message/");
        assert!("sms".parse::<ScanKind>().is_err());
    }

    #[test]
    fn test_verdict_display_semantics() {
        assert_eq!(Verdict::Phishing.tone(), Tone::Danger);
        assert_eq!(Verdict::Suspicious.tone(), Tone::Warning);
        assert_eq!(Verdict::Safe.tone(), Tone::Ok);
        assert_eq!(Verdict::Suspicious.title(), "Suspicious");
    }

    #[test]
    fn test_history_entry_serializes_type_field() {
        let outcome = ScanOutcome {
            kind: ScanKind::Url,
            value: "http://x.example".into(),
            verdict: Verdict::Safe,
            basis: VerdictBasis::Reported,
            risk_score: 3.0,
            reasons: vec![],
            confidence: None,
        };
        let entry = HistoryEntry::from_outcome(&outcome);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "url");
        assert_eq!(json["verdict"], "safe");
    }

    #[test]
    fn test_entry_ids_are_distinct() {
        let a = EntryId::new();
        let b = EntryId::new();
        assert_ne!(a, b);
    }
}
