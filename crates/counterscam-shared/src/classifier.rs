//! Verdict classification.
//!
//! Maps whatever the detection service said about an item onto the three
//! canonical verdicts. Pure and total: every input yields a verdict.

use serde::Serialize;

use crate::protocol::FlagValue;
use crate::types::{Verdict, VerdictBasis};

/// The part of a detection response that carries the verdict, reduced to
/// the three shapes the service has used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionSignal {
    /// Current contract: a string label.
    Verdict(String),
    /// Legacy contract: a boolean `flagged`.
    Flagged(bool),
    /// Neither field present (or unreadable).
    Missing,
}

impl DetectionSignal {
    /// A string verdict wins over `flagged` when both are present.
    pub fn from_fields(verdict: Option<&str>, flagged: Option<&FlagValue>) -> Self {
        if let Some(label) = verdict {
            return Self::Verdict(label.to_string());
        }
        match flagged.and_then(FlagValue::as_bool) {
            Some(flag) => Self::Flagged(flag),
            None => Self::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub verdict: Verdict,
    pub basis: VerdictBasis,
}

pub fn classify(signal: &DetectionSignal) -> Classification {
    match signal {
        DetectionSignal::Verdict(label) => {
            let verdict = match label.trim().to_lowercase().as_str() {
                "phishing" => Verdict::Phishing,
                "suspicious" => Verdict::Suspicious,
                _ => Verdict::Safe,
            };
            Classification {
                verdict,
                basis: VerdictBasis::Reported,
            }
        }
        // The boolean contract cannot tell phishing from generic suspicion.
        DetectionSignal::Flagged(true) => Classification {
            verdict: Verdict::Suspicious,
            basis: VerdictBasis::LegacyFlag,
        },
        DetectionSignal::Flagged(false) => Classification {
            verdict: Verdict::Safe,
            basis: VerdictBasis::LegacyFlag,
        },
        // Display fallback only.
        DetectionSignal::Missing => Classification {
            verdict: Verdict::Safe,
            basis: VerdictBasis::Defaulted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict_of(signal: DetectionSignal) -> Verdict {
        classify(&signal).verdict
    }

    #[test]
    fn test_string_verdict_any_case() {
        for label in ["phishing", "Phishing", "PHISHING", " phishing "] {
            assert_eq!(verdict_of(DetectionSignal::Verdict(label.into())), Verdict::Phishing);
        }
        assert_eq!(
            verdict_of(DetectionSignal::Verdict("Suspicious".into())),
            Verdict::Suspicious
        );
    }

    #[test]
    fn test_unknown_or_empty_label_is_safe() {
        assert_eq!(verdict_of(DetectionSignal::Verdict("".into())), Verdict::Safe);
        assert_eq!(verdict_of(DetectionSignal::Verdict("malware".into())), Verdict::Safe);
        assert_eq!(
            classify(&DetectionSignal::Verdict("".into())).basis,
            VerdictBasis::Reported
        );
    }

    #[test]
    fn test_legacy_flag() {
        assert_eq!(verdict_of(DetectionSignal::Flagged(true)), Verdict::Suspicious);
        assert_eq!(verdict_of(DetectionSignal::Flagged(false)), Verdict::Safe);
    }

    #[test]
    fn test_missing_is_safe_but_marked_defaulted() {
        let c = classify(&DetectionSignal::Missing);
        assert_eq!(c.verdict, Verdict::Safe);
        assert_eq!(c.basis, VerdictBasis::Defaulted);
    }

    #[test]
    fn test_verdict_field_takes_precedence() {
        let flag = FlagValue::Bool(true);
        let signal = DetectionSignal::from_fields(Some("safe"), Some(&flag));
        assert_eq!(signal, DetectionSignal::Verdict("safe".into()));
    }

    #[test]
    fn test_text_flags_from_stored_checks() {
        let yes = FlagValue::Text("True".into());
        let junk = FlagValue::Text("maybe".into());
        assert_eq!(
            DetectionSignal::from_fields(None, Some(&yes)),
            DetectionSignal::Flagged(true)
        );
        assert_eq!(
            DetectionSignal::from_fields(None, Some(&junk)),
            DetectionSignal::Missing
        );
        assert_eq!(DetectionSignal::from_fields(None, None), DetectionSignal::Missing);
    }
}
