//! Environment-driven configuration.
//!
//! `AppConfig::from_env` is called once at startup after `.env` has been
//! loaded. Secrets are required; everything else has a default.
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_FRONTEND_URL: &str = "https://platform.hexelstudio.com/dashboard/assistants";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct OAuthAppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Base URLs of every external API, overridable so tests can point them at a mock.
#[derive(Clone, Debug)]
pub struct ProviderEndpoints {
    pub linkedin_auth: Url,
    pub linkedin_api: Url,
    pub x_auth: Url,
    pub x_api: Url,
    pub gemini: Url,
    pub google_search: Url,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            linkedin_auth: parse_static_url("https://www.linkedin.com"),
            linkedin_api: parse_static_url("https://api.linkedin.com"),
            x_auth: parse_static_url("https://x.com"),
            x_api: parse_static_url("https://api.x.com"),
            gemini: parse_static_url("https://generativelanguage.googleapis.com"),
            google_search: parse_static_url("https://www.googleapis.com"),
        }
    }
}

impl ProviderEndpoints {
    /// Every endpoint at the same base, as used against a single mock server.
    pub fn all_at(base: &Url) -> Self {
        Self {
            linkedin_auth: base.clone(),
            linkedin_api: base.clone(),
            x_auth: base.clone(),
            x_api: base.clone(),
            gemini: base.clone(),
            google_search: base.clone(),
        }
    }
}

fn parse_static_url(url: &str) -> Url {
    Url::parse(url).expect("default endpoint should be a valid URL")
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_address: SocketAddr,
    pub frontend_url: Url,
    pub linkedin: OAuthAppConfig,
    pub x: OAuthAppConfig,
    pub google_api_key: String,
    pub search_engine_id: Option<String>,
    pub search_max_results: usize,
    pub gemini_model: String,
    pub gemini_max_output_tokens: u32,
    pub rate_limit_per_minute: u32,
    pub oauth_state_ttl: Duration,
    pub endpoints: ProviderEndpoints,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env = Env(vars);

        Ok(Self {
            database_url: env.required("DATABASE_URL")?,
            database_max_connections: env.parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            bind_address: env.parsed_or("BIND_ADDRESS", SocketAddr::from(([0, 0, 0, 0], 8000)))?,
            frontend_url: env.parsed_or("FRONTEND_URL", parse_static_url(DEFAULT_FRONTEND_URL))?,
            linkedin: OAuthAppConfig {
                client_id: env.required("LINKEDIN_CLIENT_ID")?,
                client_secret: env.required("LINKEDIN_CLIENT_SECRET")?,
                redirect_uri: env.required("LINKEDIN_REDIRECT_URI")?,
            },
            x: OAuthAppConfig {
                client_id: env.required("X_CLIENT_ID")?,
                client_secret: env.required("X_CLIENT_SECRET")?,
                redirect_uri: env.required("X_REDIRECT_URI")?,
            },
            google_api_key: env.required("GOOGLE_API_KEY")?,
            search_engine_id: env.optional("SEARCH_ENGINE_ID"),
            search_max_results: env.parsed_or("SEARCH_MAX_RESULTS", 5)?,
            gemini_model: env
                .optional("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_max_output_tokens: env.parsed_or("GEMINI_MAX_OUTPUT_TOKENS", 4096)?,
            rate_limit_per_minute: env.parsed_or("RATE_LIMIT_REQUESTS_PER_MINUTE", 10)?,
            oauth_state_ttl: Duration::from_secs(env.parsed_or("OAUTH_STATE_TTL_SECONDS", 600)?),
            endpoints: ProviderEndpoints::default(),
        })
    }
}

struct Env(HashMap<String, String>);

impl Env {
    fn optional(&self, name: &'static str) -> Option<String> {
        self.0
            .get(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.optional(name).ok_or(ConfigError::Missing(name))
    }

    fn parsed_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.optional(name) {
            None => Ok(default),
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value }),
        }
    }
}
