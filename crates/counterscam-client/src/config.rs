//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration against a local service.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use counterscam_shared::constants::{
    DASHBOARD_MAX_HISTORY, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, MOBILE_MAX_HISTORY,
};

use crate::error::ClientError;

/// Which presentation surface the runtime is deployed behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Admin console: session and history live in memory only.
    Dashboard,
    /// Scanning app: session and history persist in the local database.
    Mobile,
}

impl Profile {
    pub fn default_max_history(&self) -> usize {
        match self {
            Self::Dashboard => DASHBOARD_MAX_HISTORY,
            Self::Mobile => MOBILE_MAX_HISTORY,
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Mobile)
    }
}

impl FromStr for Profile {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "mobile" => Ok(Self::Mobile),
            other => Err(ClientError::Config(format!("unknown profile: {other}"))),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the detection / admin service.
    /// Env: `COUNTERSCAM_API_BASE`
    /// Default: `http://localhost:8000`
    pub api_base: String,

    /// Deployment profile.
    /// Env: `COUNTERSCAM_PROFILE` (`dashboard` / `mobile`)
    /// Default: `mobile`
    pub profile: Profile,

    /// Maximum number of history entries kept.
    /// Env: `COUNTERSCAM_MAX_HISTORY`
    /// Default: 30 (dashboard) / 50 (mobile)
    pub max_history: usize,

    /// Per-request timeout.
    /// Env: `COUNTERSCAM_TIMEOUT_SECS`
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Explicit database path for the durable profile.
    /// Env: `COUNTERSCAM_DB_PATH`
    /// Default: platform data directory.
    pub db_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_profile(Profile::Mobile)
    }
}

impl ClientConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            profile,
            max_history: profile.default_max_history(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            db_path: None,
        }
    }

    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match var("COUNTERSCAM_PROFILE") {
            Some(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!(value = %value, error = %e, "Invalid COUNTERSCAM_PROFILE, using mobile");
                Profile::Mobile
            }),
            None => Profile::Mobile,
        };

        let mut config = Self::for_profile(profile);

        if let Some(base) = var("COUNTERSCAM_API_BASE") {
            let base = base.trim().trim_end_matches('/').to_string();
            if base.starts_with("http://") || base.starts_with("https://") {
                config.api_base = base;
            } else {
                tracing::warn!(value = %base, "Invalid COUNTERSCAM_API_BASE, using default");
            }
        }

        if let Some(value) = var("COUNTERSCAM_MAX_HISTORY") {
            match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_history = n,
                _ => tracing::warn!(value = %value, "Invalid COUNTERSCAM_MAX_HISTORY, using default"),
            }
        }

        if let Some(value) = var("COUNTERSCAM_TIMEOUT_SECS") {
            match value.trim().parse::<u64>() {
                Ok(n) if n > 0 => config.timeout = Duration::from_secs(n),
                _ => tracing::warn!(value = %value, "Invalid COUNTERSCAM_TIMEOUT_SECS, using default"),
            }
        }

        if let Some(path) = var("COUNTERSCAM_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Absolute URL for a service path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}
