//! Per-IP sliding-window rate limiting for the search endpoint.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Above this many tracked IPs, idle entries are pruned before each check.
const PRUNE_THRESHOLD: usize = 1000;

/// Returns true if the request is allowed, false if rate-limited.
/// Drops timestamps older than `window` and records `now` when allowed.
pub fn check_rate_limit(
    entries: &mut Vec<Instant>,
    now: Instant,
    window: Duration,
    max_requests: usize,
) -> bool {
    entries.retain(|t| now.duration_since(*t) < window);
    if entries.len() >= max_requests {
        return false;
    }
    entries.push(now);
    true
}

/// Removes IPs with no requests inside the window.
pub fn prune_idle(limiter: &mut HashMap<IpAddr, Vec<Instant>>, now: Instant, window: Duration) {
    limiter.retain(|_, entries| {
        entries.retain(|t| now.duration_since(*t) < window);
        !entries.is_empty()
    });
}

/// Client address: the socket peer, or the first `X-Forwarded-For` hop when
/// proxy headers are trusted.
fn client_ip(request: &Request, trust_proxy_headers: bool) -> IpAddr {
    let forwarded = trust_proxy_headers
        .then(|| {
            request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(|ip| ip.trim().parse().ok())
        })
        .flatten();

    forwarded
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        })
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request, state.config.trust_proxy_headers);
    let window = Duration::from_secs(state.config.rate_limit_window_secs);
    let now = Instant::now();

    let allowed = {
        let mut limiter = state.rate_limiter.lock().await;
        if limiter.len() > PRUNE_THRESHOLD {
            prune_idle(&mut limiter, now, window);
        }
        let entries = limiter.entry(ip).or_default();
        check_rate_limit(entries, now, window, state.config.rate_limit_max_requests)
    };

    if !allowed {
        warn!("Rate limit exceeded for {ip}");
        return AppError::TooManyRequests.into_response();
    }

    next.run(request).await
}
