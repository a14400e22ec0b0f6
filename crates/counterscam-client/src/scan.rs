//! Scan orchestration.
//!
//! A scan validates its input locally, posts it to the detection endpoint
//! for its kind, normalizes the reply into a [`ScanOutcome`] and records it
//! in the history cache. Each scan is stamped with a monotonically
//! increasing sequence number when it starts; [`LatestScan`] uses it so a
//! slow reply to an earlier scan never replaces the display of a later one.
//! History records in resolution order regardless.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use counterscam_shared::protocol::{CheckMessageBody, CheckUrlBody, DetectionResponse};
use counterscam_shared::{EntryId, HistoryEntry, ScanKind, ScanOutcome, ScanRequest};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::access::AccessLayer;
use crate::error::Result;
use crate::history::HistoryCache;

/// A resolved scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    /// Start order of the scan within this orchestrator.
    pub seq: u64,
    pub outcome: ScanOutcome,
    /// Id of the history entry this scan produced.
    pub entry_id: EntryId,
}

#[derive(Debug, Clone)]
pub struct ScanOrchestrator {
    access: AccessLayer,
    history: HistoryCache,
    seq: Arc<AtomicU64>,
}

impl ScanOrchestrator {
    pub fn new(access: AccessLayer, history: HistoryCache) -> Self {
        Self {
            access,
            history,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    pub async fn scan_url(&self, url: &str) -> Result<ScanReport> {
        self.scan(ScanRequest::url(url)).await
    }

    pub async fn scan_message(&self, message: &str) -> Result<ScanReport> {
        self.scan(ScanRequest::message(message)).await
    }

    /// Run one scan to completion.
    ///
    /// Invalid input fails before any request is made. On any failure
    /// nothing is recorded.
    pub async fn scan(&self, request: ScanRequest) -> Result<ScanReport> {
        let seq = self.next_seq();
        self.run(seq, request).await
    }

    /// Run a scan on the runtime. The start order is fixed when this is
    /// called, and the scan completes and records even if the returned
    /// handle is dropped.
    pub fn spawn_scan(&self, request: ScanRequest) -> JoinHandle<Result<ScanReport>> {
        let seq = self.next_seq();
        let this = self.clone();
        tokio::spawn(async move { this.run(seq, request).await })
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn run(&self, seq: u64, request: ScanRequest) -> Result<ScanReport> {
        request.validate()?;

        let ScanRequest { kind, payload } = request;

        tracing::debug!(seq, %kind, len = payload.chars().count(), "Starting scan");

        let response: DetectionResponse = match kind {
            ScanKind::Url => {
                let body = CheckUrlBody { url: payload.clone() };
                self.access.post::<_, DetectionResponse>(kind.endpoint(), &body).await
            }
            ScanKind::Message => {
                let body = CheckMessageBody {
                    message: payload.clone(),
                };
                self.access.post::<_, DetectionResponse>(kind.endpoint(), &body).await
            }
        }
        .map_err(|e| {
            tracing::warn!(seq, %kind, error = %e, "Scan failed");
            e
        })?;

        let outcome = response.into_outcome(kind, payload);
        let entry = HistoryEntry::from_outcome(&outcome);
        let entry_id = entry.id;
        self.history.record(entry);

        tracing::info!(
            seq,
            %kind,
            verdict = %outcome.verdict,
            basis = ?outcome.basis,
            risk_score = outcome.risk_score,
            "Scan resolved"
        );

        Ok(ScanReport {
            seq,
            outcome,
            entry_id,
        })
    }
}

/// The scan result currently on display. Later-started scans win.
#[derive(Debug, Clone, Default)]
pub struct LatestScan {
    slot: Arc<Mutex<Option<ScanReport>>>,
}

impl LatestScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a resolved scan for display. Returns false, leaving the
    /// display unchanged, when a later-started scan is already shown.
    pub fn offer(&self, report: ScanReport) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(current) if current.seq > report.seq => {
                tracing::debug!(
                    stale = report.seq,
                    shown = current.seq,
                    "Discarding stale scan result"
                );
                false
            }
            _ => {
                *slot = Some(report);
                true
            }
        }
    }

    pub fn current(&self) -> Option<ScanReport> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
