//! Access layer: credentialed request dispatch.
//!
//! Every call to the service goes through [`AccessLayer::send`]. It attaches
//! the bearer token when one is held, and treats a 401 on any call as the end
//! of the session: the token store is cleared once, a
//! [`SessionEvent::Ended`] is published, and the call fails with
//! [`ClientError::SessionEnded`]. Nothing is retried.

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::{SessionEndReason, SessionEvent, SessionEvents};
use crate::session::TokenStore;

#[derive(Debug, Clone)]
pub struct AccessLayer {
    http: reqwest::Client,
    api_base: String,
    tokens: TokenStore,
    events: SessionEvents,
}

impl AccessLayer {
    pub fn new(config: &ClientConfig, tokens: TokenStore, events: SessionEvents) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            tokens,
            events,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        decode(response).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    /// POST where only the status matters.
    pub async fn post_ack<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// Dispatch one request and map its status. Returns the response only
    /// for 2xx statuses.
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.api_base, path);

        let mut request = self.http.request(method.clone(), &url);
        let authenticated = match self.tokens.get() {
            Some(token) => {
                request = request.bearer_auth(token);
                true
            }
            None => false,
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, path, authenticated, "Dispatching request");

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "Request failed in transport");
            ClientError::from(e)
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            info!(%method, path, "Service answered 401, ending session");
            self.tokens.clear();
            self.events.emit(SessionEvent::Ended {
                reason: SessionEndReason::Unauthorized,
            });
            return Err(ClientError::SessionEnded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%method, path, status = status.as_u16(), "Service returned an error");
            return Err(ClientError::Service {
                status: status.as_u16(),
                body,
            });
        }

        debug!(%method, path, status = status.as_u16(), "Request succeeded");
        Ok(response)
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R> {
    let bytes = response.bytes().await.map_err(ClientError::from)?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
