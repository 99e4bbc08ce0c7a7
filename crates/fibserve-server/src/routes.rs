//! Shared state and router configuration.

use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use fibserve_core::{FibCache, Limits};
use lru::LruCache;
use num_bigint::BigUint;
use parking_lot::Mutex;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers::{health_handler, nth_handler, sequence_handler};

/// State shared by every request.
///
/// The sequence cache is single-writer, so all requests go through one
/// mutex: a request that extends the cache holds the lock until the missing
/// suffix is computed, and concurrent requests wait for it.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<Mutex<FibCache>>,
    pub nth_cache: Arc<Mutex<LruCache<u64, Arc<BigUint>>>>,
    pub limits: Limits,
}

impl AppState {
    #[must_use]
    pub fn new(limits: Limits, nth_capacity: NonZeroUsize) -> Self {
        Self {
            cache: Arc::new(Mutex::new(FibCache::new().with_limits(limits))),
            nth_cache: Arc::new(Mutex::new(LruCache::new(nth_capacity))),
            limits,
        }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.limits(), config.nth_cache_size)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/fibonacci/{n}", get(sequence_handler))
        .route("/api/nth/{n}", get(nth_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
