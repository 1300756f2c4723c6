use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::warn;

const WINDOW: Duration = Duration::from_secs(60);

/// Fixed-window request counter per client address. A limit of zero disables it.
#[derive(Debug)]
pub struct RateLimiter {
    limit_per_minute: u32,
    window: Duration,
    clients: Mutex<HashMap<String, (u32, Instant)>>,
}

impl RateLimiter {
    pub fn new(limit_per_minute: u32) -> Self {
        Self::with_window(limit_per_minute, WINDOW)
    }

    pub fn with_window(limit_per_minute: u32, window: Duration) -> Self {
        Self {
            limit_per_minute,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// Counts a request from `client`; on rejection returns the seconds until the window resets.
    pub async fn check(&self, client: &str) -> Result<(), u64> {
        if self.limit_per_minute == 0 {
            return Ok(());
        }

        let now = Instant::now();
        let window = self.window;
        let mut clients = self.clients.lock().await;
        // purge closed windows
        clients.retain(|_, (_, started)| now.duration_since(*started) <= window);
        let entry = clients.entry(client.to_string()).or_insert((0, now));

        if entry.0 >= self.limit_per_minute {
            let elapsed = now.duration_since(entry.1).as_secs();
            return Err(window.as_secs().saturating_sub(elapsed).max(1));
        }
        entry.0 += 1;

        Ok(())
    }
}

fn client_key<B>(request: &Request<B>) -> String {
    forwarded_for(request.headers())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(|hop| hop.trim().to_string())
        .filter(|hop| !hop.is_empty())
}

pub async fn rate_limit<B>(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let client = client_key(&request);
    match limiter.check(&client).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(client, retry_after, "rate limit exceeded");
            let payload = json!({ "errors": [{ "detail": "rate limit exceeded" }] });
            let mut response = (StatusCode::TOO_MANY_REQUESTS, axum::Json(payload)).into_response();
            response
                .headers_mut()
                .insert("Retry-After", HeaderValue::from(retry_after));
            response
        }
    }
}
