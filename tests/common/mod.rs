//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use log_endpoint::backend::{BackendEntry, BackendError, ListEntriesRequest, LogBackend};
use log_endpoint::config::EndpointConfig;
use log_endpoint::http::HttpServer;
use log_endpoint::lifecycle::Shutdown;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-secret";

/// Config with a known API key and no guide file.
pub fn test_config() -> EndpointConfig {
    let mut config = EndpointConfig::default();
    config.auth.api_key = Some(API_KEY.to_string());
    config.help.guide_path = "does/not/exist/USAGE.md".to_string();
    config.listener.bind_host = "127.0.0.1".to_string();
    config
}

/// In-memory backend that counts and records calls.
pub struct MockBackend {
    calls: Mutex<Vec<ListEntriesRequest>>,
    reply: Mutex<Result<Vec<BackendEntry>, String>>,
}

impl MockBackend {
    pub fn returning(entries: Vec<BackendEntry>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Mutex::new(Ok(entries)),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Mutex::new(Err(message.to_string())),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<ListEntriesRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl LogBackend for MockBackend {
    fn list_entries(
        &self,
        request: ListEntriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BackendEntry>, BackendError>> + Send + '_>> {
        self.calls.lock().unwrap().push(request);
        let reply = match &*self.reply.lock().unwrap() {
            Ok(entries) => Ok(entries.clone()),
            Err(message) => Err(BackendError::Api {
                status: 400,
                message: message.clone(),
            }),
        };
        Box::pin(async move { reply })
    }
}

/// Backend entries as the Logging API would return them, newest first.
pub fn sample_entries() -> Vec<BackendEntry> {
    serde_json::from_value(sample_entries_json()).unwrap()
}

pub fn sample_entries_json() -> Value {
    json!([
        {
            "insertId": "e3",
            "timestamp": "2024-05-01T12:00:03Z",
            "severity": "ERROR",
            "jsonPayload": {"message": "db timeout", "attempt": 3},
            "resource": {"type": "cloud_run_revision", "labels": {"service_name": "backend"}},
            "logName": "projects/acme/logs/run.googleapis.com%2Fstderr",
            "labels": {"instanceId": "00bf"}
        },
        {
            "insertId": "e2",
            "timestamp": "2024-05-01T12:00:02Z",
            "severity": "WARNING",
            "textPayload": "slow request",
            "resource": {"type": "cloud_run_revision", "labels": {"service_name": "backend"}}
        },
        {
            "insertId": "e1",
            "timestamp": "2024-05-01T12:00:01Z",
            "textPayload": "started",
            "resource": {"type": "cloud_run_revision", "labels": {"service_name": "backend"}}
        }
    ])
}

/// Start the endpoint on an ephemeral port.
pub async fn spawn_server(config: EndpointConfig, backend: Arc<dyn LogBackend>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, backend);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// What the fake Logging API saw.
#[derive(Default)]
pub struct Recorded {
    pub list_bodies: Vec<Value>,
    pub authorization: Vec<String>,
    pub token_requests: usize,
}

#[derive(Clone)]
struct FakeGoogle {
    recorded: Arc<Mutex<Recorded>>,
    list_status: StatusCode,
    list_body: Value,
}

/// Start a fake Logging API plus metadata server answering with `status`/`body`
/// on `entries:list`. Returns its base URL.
pub async fn start_fake_google(status: StatusCode, body: Value) -> (String, Arc<Mutex<Recorded>>) {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let state = FakeGoogle {
        recorded: recorded.clone(),
        list_status: status,
        list_body: body,
    };

    let app = Router::new()
        .route("/v2/entries:list", post(fake_list))
        .route(
            "/computeMetadata/v1/instance/service-accounts/default/token",
            get(fake_token),
        )
        .route("/computeMetadata/v1/project/project-id", get(fake_project))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}"), recorded)
}

async fn fake_list(
    State(state): State<FakeGoogle>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut recorded = state.recorded.lock().unwrap();
    recorded.list_bodies.push(body);
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        recorded.authorization.push(auth.to_string());
    }
    (state.list_status, Json(state.list_body.clone()))
}

async fn fake_token(State(state): State<FakeGoogle>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if headers.get("metadata-flavor").and_then(|v| v.to_str().ok()) != Some("Google") {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "missing Metadata-Flavor"})));
    }
    state.recorded.lock().unwrap().token_requests += 1;
    (
        StatusCode::OK,
        Json(json!({"access_token": "metadata-token", "expires_in": 3599, "token_type": "Bearer"})),
    )
}

async fn fake_project(headers: HeaderMap) -> (StatusCode, String) {
    if headers.get("metadata-flavor").and_then(|v| v.to_str().ok()) != Some("Google") {
        return (StatusCode::FORBIDDEN, String::new());
    }
    (StatusCode::OK, "acme-prod".to_string())
}
