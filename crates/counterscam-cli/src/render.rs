//! Plain-text rendering of client results for the terminal.
//!
//! With `--json` every command prints the serialized value instead.

use counterscam_client::ScanReport;
use counterscam_shared::protocol::{Analytics, RecentCheck, StatsSummary};
use counterscam_shared::{HistoryEntry, Tone, Verdict};
use serde::Serialize;

fn marker(verdict: Verdict) -> &'static str {
    match verdict.tone() {
        Tone::Ok => "[ok]",
        Tone::Warning => "[!!]",
        Tone::Danger => "[XX]",
    }
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn scan(report: &ScanReport) {
    let outcome = &report.outcome;
    println!(
        "{} {}  {}",
        marker(outcome.verdict),
        outcome.verdict.title(),
        outcome.value
    );
    println!("     risk score: {:.0}", outcome.risk_score);
    if let Some(confidence) = outcome.confidence {
        println!("     confidence: {:.0}%", confidence * 100.0);
    }
    if !outcome.reasons.is_empty() {
        println!("     {}", outcome.reasons_line());
    }
    if !outcome.is_confirmed() {
        println!("     (the service returned no verdict for this item)");
    }
}

pub fn history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No scans yet.");
        return;
    }
    for entry in entries {
        println!(
            "{} {:<10} {:<7} {:>3.0}  {}  {}",
            marker(entry.verdict),
            entry.verdict.title(),
            entry.kind.as_str(),
            entry.risk_score,
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.value
        );
    }
}

pub fn stats(stats: &StatsSummary) {
    println!("Total checks:      {}", stats.total_checks);
    println!("Phishing detected: {}", stats.phishing_detected);
    println!("Safe:              {}", stats.safe);
    println!("Detection rate:    {:.1}%", stats.detection_rate());
}

pub fn recent(checks: &[RecentCheck]) {
    if checks.is_empty() {
        println!("No recent checks.");
        return;
    }
    for check in checks {
        let risk = check
            .risk_score
            .map(|r| format!("{r:>3.0}"))
            .unwrap_or_else(|| "  -".to_string());
        println!(
            "{} {:<10} {:<7} {}  {}  {}",
            marker(check.verdict),
            check.verdict.title(),
            check.kind.as_str(),
            risk,
            check.created_at.as_deref().unwrap_or("-"),
            check.value
        );
    }
}

pub fn analytics(analytics: &Analytics) {
    println!("Attack trend:");
    for point in &analytics.attack_trend {
        println!("  {}  {}", point.date, point.count);
    }
    println!("Top domains:");
    for domain in &analytics.top_domains {
        println!("  {:<40} {}", domain.domain, domain.count);
    }
}
