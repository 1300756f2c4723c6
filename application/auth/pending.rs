use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::auth::generate_state;
use crate::models::platform::Platform;

/// A login redirect that has been issued but whose callback has not arrived yet.
#[derive(Clone, Debug)]
pub struct PendingAuthorization {
    pub platform: Platform,
    pub user_id: String,
    pub code_verifier: Option<String>,
    created_at: Instant,
}

impl PendingAuthorization {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Pending authorizations keyed by OAuth `state`. Each entry can be taken once.
#[derive(Debug)]
pub struct PendingAuthorizations {
    ttl: Duration,
    entries: Mutex<HashMap<String, PendingAuthorization>>,
}

impl PendingAuthorizations {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Records a new authorization and returns the `state` to send to the provider.
    pub async fn insert(
        &self,
        platform: Platform,
        user_id: &str,
        code_verifier: Option<String>,
    ) -> String {
        let state = generate_state();
        let pending = PendingAuthorization {
            platform,
            user_id: user_id.to_string(),
            code_verifier,
            created_at: Instant::now(),
        };

        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        if entries.len() < before {
            debug!(purged = before - entries.len(), "purged expired authorizations");
        }
        entries.insert(state.clone(), pending);

        state
    }

    pub async fn take(&self, platform: Platform, state: &str) -> Option<PendingAuthorization> {
        let mut entries = self.entries.lock().await;
        let pending = entries.remove(state)?;

        if pending.platform != platform || pending.is_expired(self.ttl) {
            return None;
        }

        Some(pending)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
