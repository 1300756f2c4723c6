use std::sync::Arc;

use reqwest::Client;
use url::Url;

use crate::agent::{PostComposer, WebAgent};
use crate::auth::{PendingAuthorizations, RateLimiter};
use crate::config::AppConfig;
use crate::llm::DynLanguageModel;
use crate::models::platform::Platform;
use crate::publisher::Publisher;
use crate::repository::DynRepository;
use crate::search::DynSearchProvider;
use crate::social::{LinkedInClient, TwitterClient};

#[derive(Clone)]
pub struct AppState {
    pub repository: DynRepository,
    pub linkedin: LinkedInClient,
    pub twitter: TwitterClient,
    pub composer: PostComposer,
    pub publisher: Publisher,
    pub pending: Arc<PendingAuthorizations>,
    pub rate_limiter: Arc<RateLimiter>,
    pub frontend_url: Url,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        http: Client,
        repository: DynRepository,
        llm: DynLanguageModel,
        search: DynSearchProvider,
    ) -> Self {
        let endpoints = &config.endpoints;
        let linkedin = LinkedInClient::new(
            http.clone(),
            config.linkedin.clone(),
            endpoints.linkedin_auth.clone(),
            endpoints.linkedin_api.clone(),
        );
        let twitter = TwitterClient::new(
            http,
            config.x.clone(),
            endpoints.x_auth.clone(),
            endpoints.x_api.clone(),
        );
        let publisher = Publisher::new(repository.clone(), linkedin.clone(), twitter.clone());

        Self {
            repository,
            linkedin,
            twitter,
            composer: PostComposer::new(WebAgent::new(llm, search)),
            publisher,
            pending: Arc::new(PendingAuthorizations::new(config.oauth_state_ttl)),
            rate_limiter: Arc::new(RateLimiter::new(config.rate_limit_per_minute)),
            frontend_url: config.frontend_url.clone(),
        }
    }

    /// Where the browser lands once a platform has been connected.
    pub fn connected_redirect(&self, platform: Platform, user_id: &str) -> Url {
        let mut url = self.frontend_url.clone();
        url.query_pairs_mut()
            .append_pair("platform", platform.as_str())
            .append_pair("user_id", user_id)
            .append_pair("status", "connected");
        url
    }
}
