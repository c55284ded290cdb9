//! Configuration for wallet-web.

use axum::http::HeaderValue;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the web server.
    pub address: SocketAddr,
    /// File holding the wallet record.
    pub state_file: PathBuf,
    /// Cross-origin policy.
    pub cors: CorsPolicy,
}

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, method and header. Meant for local development.
    #[default]
    Permissive,
    /// Only the listed origins; credentials allowed, methods and headers mirrored.
    Origins(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Build a policy from `--cors-origin` values. `*` anywhere means permissive.
    pub fn from_origins<S: AsRef<str>>(origins: &[S]) -> Result<Self, ConfigError> {
        let origins: Vec<&str> = origins.iter().map(|o| o.as_ref().trim()).collect();

        if origins.is_empty() || origins.contains(&"*") {
            return Ok(CorsPolicy::Permissive);
        }

        origins
            .into_iter()
            .map(parse_origin)
            .collect::<Result<Vec<_>, _>>()
            .map(CorsPolicy::Origins)
    }

    /// Tower layer enforcing this policy.
    pub fn layer(&self) -> CorsLayer {
        match self {
            CorsPolicy::Permissive => CorsLayer::permissive(),
            CorsPolicy::Origins(origins) => CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins.iter().cloned()))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        }
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
    if !has_scheme || origin.ends_with('/') {
        return Err(ConfigError::InvalidOrigin(origin.to_string()));
    }

    HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A CORS origin that is not of the form `scheme://host[:port]`.
    InvalidOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidOrigin(origin) => write!(f, "invalid CORS origin: {:?}", origin),
        }
    }
}

impl std::error::Error for ConfigError {}
