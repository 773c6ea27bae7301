use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::completion_client::CompletionProvider;
use crate::config::Config;

/// Per-IP request timestamps inside the current rate-limit window.
pub type RateLimiter = Mutex<HashMap<IpAddr, Vec<Instant>>>;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: `CompletionClient`.
    pub completion: Arc<dyn CompletionProvider>,
    pub config: Config,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionProvider>, config: Config) -> Self {
        Self {
            completion,
            config,
            rate_limiter: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
