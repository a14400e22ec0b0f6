use counterscam_shared::constants::PATH_LOGIN;
use counterscam_shared::protocol::{LoginRequest, LoginResponse};
use tracing::info;

use super::ServiceApi;
use crate::error::{ClientError, Result};
use crate::events::{SessionEndReason, SessionEvent};

impl ServiceApi {
    /// Exchange credentials for a bearer token and start a session.
    ///
    /// A 401 from the login endpoint means the credentials were refused,
    /// not that a session ended.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let body = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self
            .access
            .post(PATH_LOGIN, &body)
            .await
            .map_err(|e| match e {
                ClientError::SessionEnded => ClientError::InvalidCredentials,
                other => other,
            })?;

        if response.access_token.is_empty() {
            return Err(ClientError::Decode("empty access token".to_string()));
        }

        self.access.tokens().set(response.access_token);
        self.access.events().emit(SessionEvent::Started);

        info!(username = %body.username, "Signed in");
        Ok(())
    }

    /// Drop the session locally. The service keeps no session state.
    pub fn logout(&self) {
        self.access.tokens().clear();
        self.access.events().emit(SessionEvent::Ended {
            reason: SessionEndReason::Logout,
        });
        info!("Signed out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.access.tokens().is_authenticated()
    }
}
