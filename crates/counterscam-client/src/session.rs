//! Token store: the current session credential.
//!
//! One store is shared (by clone) between the access layer and the session
//! operations. No operation fails or panics; storage problems of the
//! durable variant are logged and the in-memory value stays authoritative.

use std::sync::{Arc, PoisonError, RwLock};

use crate::SharedDatabase;

#[derive(Clone, Default)]
pub struct TokenStore {
    token: Arc<RwLock<Option<String>>>,
    backing: Option<SharedDatabase>,
}

impl TokenStore {
    /// A store that starts empty and forgets everything on restart.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A store that writes through to the local database and starts with
    /// whatever token was saved there.
    pub fn durable(database: SharedDatabase) -> Self {
        let saved = match database.lock() {
            Ok(db) => db.load_token().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load saved session token");
                None
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Database lock poisoned, starting signed out");
                None
            }
        };

        if saved.is_some() {
            tracing::info!("Restored saved session");
        }

        Self {
            token: Arc::new(RwLock::new(saved)),
            backing: Some(database),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Overwrite the current token unconditionally.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(db) = &self.backing {
            match db.lock() {
                Ok(db) => {
                    if let Err(e) = db.save_token(&token) {
                        tracing::warn!(error = %e, "Failed to persist session token");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Database lock poisoned, token not persisted"),
            }
        }

        *guard = Some(token);
    }

    /// Drop the token. Idempotent.
    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(db) = &self.backing {
            match db.lock() {
                Ok(db) => {
                    if let Err(e) = db.clear_token() {
                        tracing::warn!(error = %e, "Failed to clear persisted session token");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Database lock poisoned, token not cleared on disk"),
            }
        }

        *guard = None;
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .field("durable", &self.backing.is_some())
            .finish()
    }
}
