#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use onboarding_service::config::{CorsConfig, MongoConfig, OnboardingConfig};
use onboarding_service::services::{DocumentStore, InMemoryStore};
use onboarding_service::{build_router, AppState};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config() -> OnboardingConfig {
    OnboardingConfig {
        common: CoreConfig {
            port: 0,
            log_level: "error".to_string(),
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "onboarding_test".to_string(),
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        otlp_endpoint: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    /// Router over a connected in-memory store.
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::new());
        store.connect().await.expect("in-memory connect cannot fail");
        Self::with_store(store)
    }

    /// Router over a store that was never connected.
    pub fn disconnected() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    fn with_store(store: Arc<InMemoryStore>) -> Self {
        let dyn_store: Arc<dyn DocumentStore> = store.clone();
        let state = AppState::new(test_config(), dyn_store);
        let router = build_router(state).expect("Failed to build router");
        Self { router, store }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

pub fn valid_onboarding_body() -> serde_json::Value {
    serde_json::json!({
        "theme": "dark",
        "personalDetails": { "name": "A", "age": 30, "email": "a@b.com" },
        "referralSource": "ad",
        "persona": "dev",
        "pricingPlan": "free"
    })
}
