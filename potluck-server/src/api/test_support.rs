//! Helpers for driving the real router in tests.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use kanau::processor::Processor;
use potluck_core::backend::Backend;
use potluck_core::config::{HostConfig, ServerConfig, SharedConfig};
use potluck_core::entities::event_config::UpdateEventConfig;
use potluck_core::memory::MemoryProcessor;
use potluck_sdk::HOST_PIN_HEADER;
use serde_json::Value;
use std::net::SocketAddr;
use tower::ServiceExt;

use crate::config::hash_pin;
use crate::server::build_router;
use crate::state::AppState;

pub const TEST_PIN: &str = "1234";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// A fresh app on the in-memory store with host PIN [`TEST_PIN`].
    pub fn new() -> Self {
        let host = HostConfig::new(hash_pin(TEST_PIN).unwrap());
        let server = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        let state = AppState::new(
            Backend::Memory(MemoryProcessor::new()),
            SharedConfig::new(server, host),
        );
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Same as [`TestApp::new`] with the Secret Santa feature switched on.
    pub async fn with_secret_santa() -> Self {
        let app = Self::new();
        app.state
            .store
            .process(UpdateEventConfig {
                secret_santa_enabled: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        app
    }

    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, body, None).await
    }

    pub async fn call_as_host(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send(method, uri, body, Some(TEST_PIN)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        pin: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(pin) = pin {
            builder = builder.header(HOST_PIN_HEADER, pin);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}
