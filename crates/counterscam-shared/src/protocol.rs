//! Wire contracts of the detection / admin service.
//!
//! Response types here are deliberately loose: two generations of the
//! service answer with different field sets. Everything is converted into
//! the canonical types of [`crate::types`] right after parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::{classify, Classification, DetectionSignal};
use crate::types::{ScanKind, ScanOutcome, Verdict, VerdictBasis};

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Body of `POST /check_url/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckUrlBody {
    pub url: String,
}

/// Body of `POST /check_message/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckMessageBody {
    pub message: String,
}

/// A `flagged` field as found in the wild: a JSON boolean from the check
/// endpoints, the strings `"True"`/`"False"` from stored checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
    Other(Value),
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Self::Other(_) => None,
        }
    }
}

/// Raw response of either detection endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub flagged: Option<FlagValue>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub reasons: Option<Vec<String>>,
    /// Single reason string of the legacy contract.
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Echo of the scanned URL (URL endpoint only).
    #[serde(default)]
    pub url: Option<String>,
}

impl DetectionResponse {
    pub fn signal(&self) -> DetectionSignal {
        DetectionSignal::from_fields(self.verdict.as_deref(), self.flagged.as_ref())
    }

    /// Classify and normalize. `value` is the payload that was submitted.
    pub fn into_outcome(self, kind: ScanKind, value: String) -> ScanOutcome {
        let Classification { verdict, basis } = classify(&self.signal());

        let reasons = match (self.reasons, self.reason) {
            (Some(reasons), _) => reasons,
            (None, Some(reason)) if !reason.trim().is_empty() => vec![reason],
            _ => Vec::new(),
        };

        ScanOutcome {
            kind,
            value,
            verdict,
            basis,
            risk_score: self.risk_score.unwrap_or(0.0),
            reasons,
            confidence: self.confidence,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Admin read endpoints
// ---------------------------------------------------------------------------

/// `GET /admin/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_checks: u64,
    #[serde(default)]
    pub phishing_detected: u64,
    #[serde(default)]
    pub safe: u64,
}

impl StatsSummary {
    /// Share of checks flagged, in percent. Zero when nothing was checked.
    pub fn detection_rate(&self) -> f64 {
        if self.total_checks == 0 {
            return 0.0;
        }
        self.phishing_detected as f64 * 100.0 / self.total_checks as f64
    }
}

/// One item of `GET /admin/recent-checks`, as sent by the server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentCheckWire {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub checked_at: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub flagged: Option<FlagValue>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// The recent-checks endpoint answers either with a bare list or with an
/// object carrying the list under `recent_checks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecentChecksBody {
    List(Vec<RecentCheckWire>),
    Wrapped {
        #[serde(default)]
        recent_checks: Vec<RecentCheckWire>,
    },
}

impl RecentChecksBody {
    pub fn into_checks(self) -> Vec<RecentCheck> {
        let items = match self {
            Self::List(items) => items,
            Self::Wrapped { recent_checks } => recent_checks,
        };
        items.into_iter().map(RecentCheck::from).collect()
    }
}

/// A server-side check, classified.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentCheck {
    pub id: Option<String>,
    pub created_at: Option<String>,
    pub kind: ScanKind,
    pub value: String,
    pub verdict: Verdict,
    pub basis: VerdictBasis,
    /// `None` when the server did not score the check.
    pub risk_score: Option<f64>,
    pub reason: Option<String>,
}

impl From<RecentCheckWire> for RecentCheck {
    fn from(wire: RecentCheckWire) -> Self {
        let Classification { verdict, basis } = classify(&DetectionSignal::from_fields(
            wire.verdict.as_deref(),
            wire.flagged.as_ref(),
        ));

        let kind = wire
            .kind
            .as_deref()
            .and_then(|k| k.parse().ok())
            .unwrap_or(ScanKind::Url);

        let id = wire.id.and_then(|v| match v {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });

        Self {
            id,
            created_at: wire.created_at.or(wire.checked_at),
            kind,
            value: wire
                .value
                .or(wire.url)
                .or(wire.content)
                .unwrap_or_default(),
            verdict,
            basis,
            risk_score: wire.risk_score,
            reason: wire.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: String,
    #[serde(default, alias = "attacks")]
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainCount {
    pub domain: String,
    #[serde(default)]
    pub count: u64,
}

/// `GET /admin/analytics`, as sent by the server. Older servers name the
/// trend `last_7_days_activity`; current ones send both keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsWire {
    #[serde(default)]
    pub attack_trend: Option<Vec<TrendPoint>>,
    #[serde(default)]
    pub last_7_days_activity: Option<Vec<TrendPoint>>,
    #[serde(default)]
    pub top_domains: Vec<DomainCount>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Analytics {
    pub attack_trend: Vec<TrendPoint>,
    pub top_domains: Vec<DomainCount>,
}

impl From<AnalyticsWire> for Analytics {
    fn from(wire: AnalyticsWire) -> Self {
        Self {
            attack_trend: wire
                .attack_trend
                .or(wire.last_7_days_activity)
                .unwrap_or_default(),
            top_domains: wire.top_domains,
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Body of `POST /report/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub kind: ScanKind,
    pub value: String,
    pub details: String,
}

impl ReportRequest {
    pub fn new(kind: ScanKind, value: impl AsRef<str>, details: impl AsRef<str>) -> Self {
        Self {
            kind,
            value: value.as_ref().trim().to_string(),
            details: details.as_ref().trim().to_string(),
        }
    }
}
