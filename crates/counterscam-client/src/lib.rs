//! # counterscam-client
//!
//! Client runtime for the CounterScam detection service: credentialed
//! access, scan orchestration, bounded scan history, session handling and
//! the admin dashboard operations. Front ends build a [`ClientState`] from a
//! [`ClientConfig`] and drive everything through it.

pub mod access;
pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod scan;
pub mod session;
pub mod state;

use std::sync::{Arc, Mutex};

use counterscam_store::Database;
use tracing_subscriber::{fmt, EnvFilter};

pub use access::AccessLayer;
pub use api::ServiceApi;
pub use config::{ClientConfig, Profile};
pub use error::{ClientError, Result};
pub use events::{SessionEndReason, SessionEvent, SessionEvents};
pub use history::HistoryCache;
pub use scan::{LatestScan, ScanOrchestrator, ScanReport};
pub use session::TokenStore;
pub use state::ClientState;

/// Local database handle shared by the token store and the history cache.
pub type SharedDatabase = Arc<Mutex<Database>>;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("counterscam_client=debug,counterscam_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
