//! In-process fake of the detection / admin service.
//!
//! Routes are matched on the exact request path. Every request is recorded
//! so tests can assert on headers, bodies and the absence of requests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use counterscam_client::{ClientConfig, ClientState, Profile};
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<String, Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeService {
    pub base: String,
    shared: Arc<Shared>,
}

impl FakeService {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(handle).with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            shared,
        }
    }

    pub fn route(&self, path: &str, canned: Canned) {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), canned);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.shared.requests.lock().unwrap().len()
    }

    pub fn config(&self, profile: Profile) -> ClientConfig {
        let mut config = ClientConfig::for_profile(profile);
        config.api_base = self.base.clone();
        config
    }

    /// In-memory client state pointed at this service.
    pub fn client(&self) -> ClientState {
        ClientState::new(self.config(Profile::Dashboard)).unwrap()
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();

    shared.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let canned = shared.routes.lock().unwrap().get(&path).cloned();
    let Some(canned) = canned else {
        return (StatusCode::NOT_FOUND, "no route").into_response();
    };

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    let status = StatusCode::from_u16(canned.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}

/// A local address nothing is listening on.
pub async fn closed_port_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
