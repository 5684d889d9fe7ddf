//! Embed delivery for SiteLock.
//!
//! Serves the embeddable page with a fresh Content-Security-Policy nonce per
//! request, plus a liveness route, behind a per-address rate limiter.

pub mod csp;
pub mod error;
pub mod nonce;
pub mod rate_limit;
pub mod template;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::header,
    middleware,
    response::{Html, IntoResponse},
    routing::get,
};
use tracing::debug;

pub use csp::ContentSecurityPolicy;
pub use error::{EmbedError, TemplateLoadError};
pub use nonce::{Nonce, NonceSource, OsNonceSource};
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use template::{FileTemplateStore, NONCE_PLACEHOLDER, StaticTemplateStore, TemplateStore};

/// Default route for the embeddable page.
pub const DEFAULT_EMBED_PATH: &str = "/api/embed.html";

/// Liveness route.
pub const HEALTH_PATH: &str = "/api/test";

/// Body of the liveness route.
pub const HEALTH_BODY: &str = "Hello from /api/test! This confirms the server is running.";

/// Router configuration.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Route the embed page is served on.
    pub embed_path: String,
    /// Marker in the template replaced by the nonce.
    pub placeholder: String,
    /// Per-address limits; `None` disables rate limiting.
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            embed_path: DEFAULT_EMBED_PATH.to_string(),
            placeholder: NONCE_PLACEHOLDER.to_string(),
            rate_limit: Some(RateLimitConfig::default()),
        }
    }
}

/// Shared, read-only state behind the router.
pub struct EmbedState {
    config: EmbedConfig,
    templates: Arc<dyn TemplateStore>,
    nonces: Arc<dyn NonceSource>,
}

impl EmbedState {
    pub fn new(
        config: EmbedConfig,
        templates: impl TemplateStore,
        nonces: impl NonceSource,
    ) -> Self {
        Self {
            config,
            templates: Arc::new(templates),
            nonces: Arc::new(nonces),
        }
    }
}

async fn embed_handler(
    State(state): State<Arc<EmbedState>>,
) -> Result<impl IntoResponse, EmbedError> {
    debug!("Request received for {}", state.config.embed_path);

    let nonce = state.nonces.issue();

    let templates = Arc::clone(&state.templates);
    let template = tokio::task::spawn_blocking(move || templates.load()).await??;

    let body = template::render(&template, &state.config.placeholder, nonce.as_str());
    let policy = ContentSecurityPolicy::with_nonce(&nonce).to_string();

    Ok(([(header::CONTENT_SECURITY_POLICY, policy)], Html(body)))
}

async fn health_handler() -> &'static str {
    debug!("{} route hit", HEALTH_PATH);
    HEALTH_BODY
}

/// Build the HTTP router with the given state.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so the
/// rate limiter can key on the peer address.
pub fn build_router(state: Arc<EmbedState>) -> Router {
    let router = Router::new()
        .route(&state.config.embed_path, get(embed_handler))
        .route(HEALTH_PATH, get(health_handler));

    let router = match state.config.rate_limit.clone() {
        Some(config) => router.layer(middleware::from_fn_with_state(
            RateLimiter::new(config),
            rate_limit::rate_limit_middleware,
        )),
        None => router,
    };

    router.with_state(state)
}
