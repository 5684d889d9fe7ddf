//! Per-source-address rate limiting.
//!
//! Fixed-window counter keyed by the peer IP. IPv6 peers are bucketed by
//! their /64 prefix. Requests without connection info (e.g. a router driven directly in tests)
//! share one bucket.
//!
//! The bucket map is capped at [`RateLimitConfig::max_sources`]. Expired
//! windows are swept at most once per window; a new source arriving while the
//! map is still full is rejected.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::warn;

const IPV6_PREFIX_MASK: u128 = !((1u128 << 64) - 1);

/// Rate limiter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u64,
    /// Window length.
    pub window: Duration,
    /// Maximum number of distinct sources tracked at once.
    pub max_sources: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
            max_sources: 10_000,
        }
    }
}

impl RateLimitConfig {
    /// Text sent with every rejected request.
    #[must_use]
    pub fn rejection_message(&self) -> String {
        let secs = self.window.as_secs();
        let span = if secs >= 60 && secs % 60 == 0 {
            let mins = secs / 60;
            format!("{mins} minute{}", if mins == 1 { "" } else { "s" })
        } else {
            format!("{secs} second{}", if secs == 1 { "" } else { "s" })
        };
        format!("Too many requests from this IP, please try again after {span}")
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u64,
    started: Instant,
}

#[derive(Debug)]
struct Buckets {
    windows: HashMap<Option<IpAddr>, Window>,
    last_sweep: Instant,
}

/// Shared rate limiter state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<Mutex<Buckets>>,
}

/// Collapses an address to the key it is counted under.
fn source_key(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V4(_) => ip,
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(Ipv6Addr::from(u128::from(v6) & IPV6_PREFIX_MASK)),
        },
    }
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(Mutex::new(Buckets {
                windows: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Records a request from `source` and returns whether it is allowed.
    pub fn check(&self, source: Option<IpAddr>) -> bool {
        self.check_at(source, Instant::now())
    }

    fn check_at(&self, source: Option<IpAddr>, now: Instant) -> bool {
        let key = source.map(source_key);
        let window = self.config.window;
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);

        if !buckets.windows.contains_key(&key) && buckets.windows.len() >= self.config.max_sources {
            if now.duration_since(buckets.last_sweep) >= window {
                buckets.windows.retain(|_, w| now.duration_since(w.started) < window);
                buckets.last_sweep = now;
            }
            if buckets.windows.len() >= self.config.max_sources {
                return false;
            }
        }

        let bucket = buckets.windows.entry(key).or_insert(Window {
            count: 0,
            started: now,
        });

        if now.duration_since(bucket.started) >= window {
            bucket.count = 0;
            bucket.started = now;
        }

        if bucket.count >= self.config.max_requests {
            false
        } else {
            bucket.count += 1;
            true
        }
    }

    #[cfg(test)]
    fn tracked_sources(&self) -> usize {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner).windows.len()
    }
}

/// Middleware rejecting requests over the per-address limit with `429`.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let source = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if !limiter.check(source) {
        warn!("Rate limit exceeded for {:?}", source);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            limiter.config.rejection_message(),
        )
            .into_response();
    }

    next.run(request).await
}
