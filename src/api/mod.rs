//! Platform-side AGS server.
//!
//! Exposes line items, scores and results of a [`Gradebook`] over HTTP,
//! guarded by bearer tokens whose scopes are checked per operation.

mod auth;
mod error;
mod handlers;
mod routes;
mod state;


use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, Ipv4Addr};

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::repository::Gradebook;
use crate::url::DEFAULT_SPLIT_TOKEN;

pub use auth::{AccessTokenValidator, StaticTokenValidator};
pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to build line item ids and pagination links
    pub base_url: String,
    /// Path token separating context ids from line item ids
    pub split_token: String,
    /// Accepted bearer tokens and the scopes they grant
    pub tokens: HashMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            split_token: DEFAULT_SPLIT_TOKEN.to_string(),
            tokens: HashMap::new(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the `AGS_BASE_URL` and `AGS_SPLIT_TOKEN`
    /// environment variables.
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var("AGS_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(split_token) = env::var("AGS_SPLIT_TOKEN") {
            config.split_token = split_token;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_split_token(mut self, split_token: impl Into<String>) -> Self {
        self.split_token = split_token.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>, scopes: Vec<String>) -> Self {
        self.tokens.insert(token.into(), scopes);
        self
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lti_ags=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration
pub async fn run<G: Gradebook + 'static>(config: Config, gradebook: G) -> Result<(), ApiError> {
    init_tracing();

    let state = AppState::new(
        gradebook,
        StaticTokenValidator::new(config.tokens),
        config.split_token,
    );
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("AGS server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
