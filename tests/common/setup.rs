use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;
use wiremock::MockServer;

use postwright::api::build_router;
use postwright::app_state::AppState;
use postwright::config::{AppConfig, ProviderEndpoints};
use postwright::llm::Generation;

use crate::common::fakes::{ScriptedModel, StaticSearch};
use crate::common::memory_repository::MemoryRepository;

pub const FRONTEND_URL: &str = "https://app.example.com/dashboard";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repository: Arc<MemoryRepository>,
    pub llm: Arc<ScriptedModel>,
    pub search: Arc<StaticSearch>,
    pub provider: MockServer,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Url {
        let location = self.headers["location"].to_str().unwrap();
        Url::parse(location).unwrap()
    }

    pub fn error_detail(&self) -> &str {
        self.body["errors"][0]["detail"].as_str().unwrap()
    }
}

pub fn test_config(provider: &Url, rate_limit: u32) -> AppConfig {
    let vars: HashMap<String, String> = [
        ("DATABASE_URL", "postgres://localhost/unused"),
        ("FRONTEND_URL", FRONTEND_URL),
        ("LINKEDIN_CLIENT_ID", "li-id"),
        ("LINKEDIN_CLIENT_SECRET", "li-secret"),
        ("LINKEDIN_REDIRECT_URI", "http://localhost:8000/auth/linkedin/callback"),
        ("X_CLIENT_ID", "x-id"),
        ("X_CLIENT_SECRET", "x-secret"),
        ("X_REDIRECT_URI", "http://localhost:8000/auth/x/callback"),
        ("GOOGLE_API_KEY", "google-key"),
        ("SEARCH_ENGINE_ID", "cx-1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .chain([(
        "RATE_LIMIT_REQUESTS_PER_MINUTE".to_string(),
        rate_limit.to_string(),
    )])
    .collect();

    let mut config = AppConfig::from_vars(vars).unwrap();
    config.endpoints = ProviderEndpoints::all_at(provider);
    config
}

pub async fn spawn_app(replies: Vec<Generation>) -> TestApp {
    spawn_app_with_rate_limit(replies, 0).await
}

pub async fn spawn_app_with_rate_limit(replies: Vec<Generation>, rate_limit: u32) -> TestApp {
    let provider = MockServer::start().await;
    let config = test_config(&Url::parse(&provider.uri()).unwrap(), rate_limit);

    let repository = Arc::new(MemoryRepository::default());
    let llm = Arc::new(ScriptedModel::new(replies));
    let search = Arc::new(StaticSearch::new(vec![
        crate::common::fakes::result("Rust 1.80 released"),
        crate::common::fakes::result("What is new in Rust"),
    ]));

    let state = AppState::new(
        &config,
        reqwest::Client::new(),
        repository.clone(),
        llm.clone(),
        search.clone(),
    );

    TestApp {
        router: build_router(state.clone()),
        state,
        repository,
        llm,
        search,
        provider,
    }
}

impl TestApp {
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request(Request::post(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.request(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}
