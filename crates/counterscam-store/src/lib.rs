//! # counterscam-store
//!
//! Durable local state for the mobile profile, backed by SQLite.
//!
//! Two things survive a restart: the bounded scan history and the session
//! token. The crate exposes a synchronous `Database` handle that wraps a
//! `rusqlite::Connection`; callers that share it across tasks put it behind
//! a mutex.

pub mod database;
pub mod history;
pub mod migrations;
pub mod session;

mod error;

pub use database::Database;
pub use error::StoreError;
