#![allow(dead_code)]

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use mockito::{Mock, ServerGuard};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use zonecheck_engine::ZonemasterClient;
use zonecheck_server::app;
use zonecheck_server::config::ServerConfig;
use zonecheck_server::service::CheckService;
use zonecheck_server::state::AppState;
use zonecheck_storage::CheckStore;

pub const RPC_PATH: &str = "/RPC2";

pub struct TestContext {
    pub temp_dir: TempDir,
    pub engine: ServerGuard,
    pub store: Arc<CheckStore>,
    pub state: AppState,
    pub app: axum::Router,
}

pub async fn build_test_context() -> Result<TestContext> {
    build_test_context_with(None, |_| {}).await
}

/// Builds an app over a fresh on-disk database. The analyzer talks to the
/// returned mock engine unless `engine_url` points it elsewhere.
pub async fn build_test_context_with<F>(engine_url: Option<String>, tweak: F) -> Result<TestContext>
where
    F: FnOnce(&mut ServerConfig),
{
    let temp_dir = tempfile::tempdir()?;
    let engine = mockito::Server::new_async().await;

    let mut config = ServerConfig::default();
    config.database.url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("zonecheck.db").display()
    );
    config.engine.url = engine_url.unwrap_or_else(|| format!("{}{}", engine.url(), RPC_PATH));
    config.engine.timeout_secs = 5;
    tweak(&mut config);

    let store = Arc::new(CheckStore::new(&config.database.url, false).await?);
    let analyzer = Arc::new(ZonemasterClient::new(
        config.engine.url.clone(),
        Some(config.engine.timeout_secs),
    )?);
    let service = Arc::new(CheckService::new(store.clone(), analyzer));

    let state = AppState {
        service,
        config: Arc::new(config),
    };
    let app = app::build_http_app(state.clone());

    Ok(TestContext {
        temp_dir,
        engine,
        store,
        state,
        app,
    })
}

/// Port on loopback with nothing listening.
pub fn closed_port_url() -> String {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind should work");
        listener.local_addr().expect("addr should exist").port()
    };
    format!("http://127.0.0.1:{port}{RPC_PATH}")
}

/// Mocks a successful `start_domain_test` answer carrying `result`.
pub async fn mock_engine_result(engine: &mut ServerGuard, result: Value) -> Mock {
    engine
        .mock("POST", RPC_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"jsonrpc": "2.0", "result": result, "id": 1}).to_string())
        .create_async()
        .await
}

/// Mocks a JSON-RPC error envelope.
pub async fn mock_engine_error(engine: &mut ServerGuard, error: Value) -> Mock {
    engine
        .mock("POST", RPC_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"jsonrpc": "2.0", "error": error, "id": 1}).to_string())
        .create_async()
        .await
}

pub fn nameserver_finding() -> Value {
    json!({
        "level": "INFO",
        "module": "NAMESERVER",
        "tag": "N01",
        "message": "Test message."
    })
}

pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    let req_body = body.unwrap_or(Value::Null).to_string();
    let req = builder
        .body(Body::from(req_body))
        .expect("request should build");

    send(app, req).await
}

pub async fn request_no_body(
    app: &axum::Router,
    method: &str,
    uri: &str,
) -> (StatusCode, Value, Option<String>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    send(app, req).await
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };

    (status, json, trace_id)
}

pub async fn create_check(app: &axum::Router, domain: &str) -> Value {
    let (status, body, _) =
        request_json(app, "POST", "/api/v1/checks/", Some(json!({ "domain": domain }))).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body
}
