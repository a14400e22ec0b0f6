//! Client state shared by every front end.
//!
//! [`ClientState`] wires the token store, session events, access layer,
//! history cache and the two operation surfaces together from one
//! [`ClientConfig`]. Every field is cheap to clone and safe to share across
//! tasks.

use std::sync::{Arc, Mutex};

use counterscam_store::Database;

use crate::access::AccessLayer;
use crate::api::ServiceApi;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::events::SessionEvents;
use crate::history::HistoryCache;
use crate::scan::ScanOrchestrator;
use crate::session::TokenStore;
use crate::SharedDatabase;

#[derive(Debug, Clone)]
pub struct ClientState {
    pub config: ClientConfig,

    /// Current session credential. Durable on the mobile profile.
    pub tokens: TokenStore,

    /// Session lifecycle notifications.
    pub events: SessionEvents,

    /// Bounded scan history, most recent first.
    pub history: HistoryCache,

    pub scanner: ScanOrchestrator,

    /// Login, admin dashboard and report operations.
    pub api: ServiceApi,
}

impl ClientState {
    /// Build the state for `config`. Opens the local database when the
    /// profile keeps state across restarts.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let database = if config.profile.is_durable() {
            Some(open_database(&config)?)
        } else {
            None
        };

        let tokens = match &database {
            Some(db) => TokenStore::durable(db.clone()),
            None => TokenStore::in_memory(),
        };
        let history = match &database {
            Some(db) => HistoryCache::durable(config.max_history, db.clone()),
            None => HistoryCache::new(config.max_history),
        };

        let events = SessionEvents::new();
        let access = AccessLayer::new(&config, tokens.clone(), events.clone())?;
        let scanner = ScanOrchestrator::new(access.clone(), history.clone());
        let api = ServiceApi::new(access);

        tracing::info!(
            profile = ?config.profile,
            api_base = %config.api_base,
            max_history = config.max_history,
            durable = database.is_some(),
            "Client state ready"
        );

        Ok(Self {
            config,
            tokens,
            events,
            history,
            scanner,
            api,
        })
    }
}

fn open_database(config: &ClientConfig) -> Result<SharedDatabase> {
    let db = match &config.db_path {
        Some(path) => Database::open_at(path)?,
        None => Database::new()?,
    };
    Ok(Arc::new(Mutex::new(db)))
}
