//! Shared helpers for embed server tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use sitelock_embed::{
    EmbedConfig, EmbedState, Nonce, NonceSource, OsNonceSource, TemplateStore, build_router,
};

/// Always hands out the same nonce.
pub struct FixedNonceSource(pub &'static str);

impl NonceSource for FixedNonceSource {
    fn issue(&self) -> Nonce {
        Nonce::from_encoded(self.0)
    }
}

/// Config with rate limiting turned off.
pub fn unlimited_config() -> EmbedConfig {
    EmbedConfig {
        rate_limit: None,
        ..EmbedConfig::default()
    }
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
pub async fn spawn_test_server(state: EmbedState) -> String {
    let app = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Server with an OS nonce source and no rate limit.
pub async fn spawn_with_template(templates: impl TemplateStore) -> String {
    spawn_test_server(EmbedState::new(unlimited_config(), templates, OsNonceSource)).await
}

/// Extracts the nonce from a `script-src` directive of a CSP header.
pub fn nonce_from_csp(csp: &str) -> String {
    let start = csp.find("'nonce-").expect("no nonce in CSP") + "'nonce-".len();
    let end = csp[start..].find('\'').expect("unterminated nonce") + start;
    csp[start..end].to_string()
}
