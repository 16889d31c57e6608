//! Rate limiting middleware.
//!
//! Per-client-IP limiting with two tiers: a global limit across all routes
//! and a stricter limit for the auth endpoints.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

use crate::app::AppState;

/// Type alias for the rate limiter used per client.
type ClientRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across all requests.
/// Keyed by client IP with an individual limiter per client.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<String, Arc<ClientRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    /// Get or create a rate limiter for the given client key.
    fn get_or_create_limiter(&self, client: &str) -> Arc<ClientRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(client) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();

        // Double-check in case another thread created it
        if let Some(limiter) = limiters.get(client) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(NonZeroU32::new(100).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(client.to_string(), limiter.clone());
        limiter
    }

    /// Check if a request from the given client should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds if limited.
    pub fn check(&self, client: &str) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(client);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }

    /// The configured per-minute limit.
    pub fn limit(&self) -> u32 {
        self.rate_limit_per_minute
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// Resolves the client key for rate limiting.
///
/// Prefers X-Forwarded-For (first hop) since deployments sit behind a
/// reverse proxy, then the connection peer address.
fn client_key(req: &Request<Body>) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware that applies the global per-IP rate limit.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.rate_limiter {
        let client = client_key(&req);
        if let Err(retry_after) = rate_limiter.check(&client) {
            return rate_limited_response(rate_limiter.limit(), retry_after);
        }
    }

    next.run(req).await
}

/// Middleware that applies the stricter per-IP limit on auth routes.
pub async fn auth_rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.auth_rate_limiter {
        let client = client_key(&req);
        if let Err(retry_after) = rate_limiter.check(&client) {
            return rate_limited_response(rate_limiter.limit(), retry_after);
        }
    }

    next.run(req).await
}

/// Create a rate limited response with proper headers and body.
fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "success": false,
        "error": format!("Rate limit of {} requests/minute exceeded", limit),
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    response.headers_mut().insert(
        header::RETRY_AFTER,
        retry_after.to_string().parse().unwrap(),
    );

    response
}
