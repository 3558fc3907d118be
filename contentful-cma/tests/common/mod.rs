//! Shared test helpers for management API tests.

#![allow(dead_code)]

use async_trait::async_trait;
use contentful_cma::model::{ContentType, Entry, Webhook};
use contentful_cma::{ApiRequest, ApiResponse, Client, ClientConfig, CmaResult, Transport};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const SPACE: &str = "id1";
pub const CONTENT_TYPE_ID: &str = "63Vgs0BFK0USe4i2mQUGK6";

/// Installs a test-writer subscriber once; `RUST_LOG` controls the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        access_token: "test-token".to_string(),
        base_url: base_url.to_string(),
        ..ClientConfig::default()
    }
}

/// A client using the real HTTP transport against `server`.
pub fn mock_client(server: &MockServer) -> Client {
    init_tracing();
    Client::new(test_config(&server.uri())).unwrap()
}

pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&raw).unwrap()
}

pub fn content_type_fixture(name: &str) -> ContentType {
    serde_json::from_value(fixture(name)).unwrap()
}

pub fn entry_fixture() -> Entry {
    serde_json::from_value(fixture("entry.json")).unwrap()
}

pub fn webhook_fixture() -> Webhook {
    serde_json::from_value(fixture("webhook.json")).unwrap()
}

/// A listing page body with `count` content types starting at `skip`.
pub fn content_type_page(total: u64, skip: u64, limit: u64, count: u64) -> Value {
    let items: Vec<Value> = (skip..skip + count)
        .map(|i| content_type_item(&format!("ct{i}"), i % 2 == 0))
        .collect();
    json!({
        "sys": {"type": "Array"},
        "total": total,
        "skip": skip,
        "limit": limit,
        "items": items
    })
}

/// A persisted content type as it appears in a listing.
pub fn content_type_item(id: &str, published: bool) -> Value {
    let mut sys = json!({
        "id": id,
        "type": "ContentType",
        "version": 3,
        "createdAt": "2017-03-20T11:16:19.344Z"
    });
    if published {
        sys["publishedAt"] = json!("2017-03-20T11:41:02.210Z");
        sys["publishedVersion"] = json!(2);
    }
    json!({"sys": sys, "name": id, "fields": []})
}

/// A conflict error document as the API sends it.
pub fn version_mismatch() -> Value {
    json!({
        "sys": {"type": "Error", "id": "VersionMismatch"},
        "message": "The version you sent does not match the current version",
        "requestId": "req-409"
    })
}

/// A transport whose requests never complete.
pub struct PendingTransport;

#[async_trait]
impl Transport for PendingTransport {
    async fn send(&self, _request: ApiRequest) -> CmaResult<ApiResponse> {
        std::future::pending().await
    }
}

/// A transport that records requests and answers from a fixed queue.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    pub requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<Vec<ApiResponse>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResponse>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            requests: Arc::default(),
            responses: Arc::new(Mutex::new(responses)),
        }
    }

    pub fn recorded(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> CmaResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop();
        Ok(next.unwrap_or_else(|| ApiResponse::new(500, "no scripted response")))
    }
}
