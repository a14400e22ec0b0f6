use counterscam_shared::ValidationError;
use counterscam_store::StoreError;
use thiserror::Error;

/// Every way a client operation can fail. None of them is fatal; all are
/// recoverable by the user retrying.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected locally, before any network call.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The service answered 401. The token store has been cleared and a
    /// session-ended event emitted.
    #[error("Session ended: please sign in again")]
    SessionEnded,

    /// Login was refused.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Any other non-success status, body passed through verbatim.
    #[error("Service error {status}: {body}")]
    Service { status: u16, body: String },

    /// Host unreachable, connection reset, TLS failure...
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// The service answered 2xx with a body we could not read.
    #[error("Invalid response from service: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_session_ended(&self) -> bool {
        matches!(self, Self::SessionEnded)
    }

    /// Transport-level failure, as opposed to an answer from the service.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }

    /// Short message suitable for an inline error label.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::SessionEnded => "Your session has ended. Sign in again.".to_string(),
            Self::InvalidCredentials => "Invalid username or password.".to_string(),
            Self::Network(_) | Self::Timeout => {
                "Could not reach the service. Check your API URL and internet connection."
                    .to_string()
            }
            Self::Service { status, .. } => format!("The service could not complete the request ({status})."),
            Self::Decode(_) => "The service sent an unexpected response.".to_string(),
            Self::Store(_) | Self::Config(_) => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
