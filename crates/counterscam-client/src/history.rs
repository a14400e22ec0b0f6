//! History cache: bounded, most-recent-first record of scan outcomes.
//!
//! Insertion order is the only ordering. The bound is enforced on every
//! `record`, so `list().len() <= capacity()` holds at all times. With a
//! durable backing each record is written through to the local database;
//! storage failures are logged and never reach the caller.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use counterscam_shared::HistoryEntry;

use crate::SharedDatabase;

#[derive(Clone)]
pub struct HistoryCache {
    entries: Arc<Mutex<VecDeque<HistoryEntry>>>,
    capacity: usize,
    backing: Option<SharedDatabase>,
}

impl HistoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
            backing: None,
        }
    }

    /// A cache hydrated from, and written through to, the local database.
    pub fn durable(capacity: usize, database: SharedDatabase) -> Self {
        let stored = match database.lock() {
            Ok(db) => db.list_history(capacity).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load stored history");
                Vec::new()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Database lock poisoned, starting with empty history");
                Vec::new()
            }
        };

        tracing::info!(entries = stored.len(), capacity, "History loaded");

        Self {
            entries: Arc::new(Mutex::new(stored.into())),
            capacity,
            backing: Some(database),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Prepend `entry`, dropping the oldest entries past capacity.
    pub fn record(&self, entry: HistoryEntry) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(db) = &self.backing {
            match db.lock() {
                Ok(mut db) => {
                    if let Err(e) = db.append_history(&entry, self.capacity) {
                        tracing::warn!(id = %entry.id, error = %e, "Failed to persist history entry");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Database lock poisoned, entry kept in memory only"),
            }
        }

        tracing::debug!(id = %entry.id, kind = %entry.kind, verdict = %entry.verdict, "Recording history entry");

        entries.push_front(entry);
        entries.truncate(self.capacity);
    }

    /// Snapshot, most recent first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry. Idempotent.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(db) = &self.backing {
            match db.lock() {
                Ok(db) => {
                    if let Err(e) = db.clear_history() {
                        tracing::warn!(error = %e, "Failed to clear stored history");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Database lock poisoned, stored history kept"),
            }
        }

        entries.clear();
    }
}

impl std::fmt::Debug for HistoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("durable", &self.backing.is_some())
            .finish()
    }
}
