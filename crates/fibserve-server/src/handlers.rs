//! HTTP request handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use fibserve_core::{checked_index, fib_nth_bounded};
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::response::{Decimal, HealthResponse, NthResponse, SequenceResponse};
use crate::routes::AppState;

/// Parse the `{n}` path segment into a core index.
pub fn parse_index(raw: &str) -> Result<u64> {
    let n: i64 = raw
        .parse()
        .map_err(|_| ApiError::NotAnInteger(raw.to_owned()))?;
    Ok(checked_index(n)?)
}

/// `GET /api/fibonacci/{n}`: the first `n` Fibonacci numbers.
pub async fn sequence_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<SequenceResponse>> {
    let n = parse_index(&raw)?;

    let cache = Arc::clone(&state.cache);
    let nums = tokio::task::spawn_blocking(move || {
        let mut cache = cache.lock();
        cache.first(n).map(<[_]>::to_vec)
    })
    .await??;

    debug!(n, "served sequence");
    Ok(Json(SequenceResponse::new(nums)))
}

/// `GET /api/nth/{n}`: the single value F(n).
pub async fn nth_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<NthResponse>> {
    let n = parse_index(&raw)?;

    let hit = state.nth_cache.lock().get(&n).cloned();
    if let Some(hit) = hit {
        debug!(n, "nth cache hit");
        return Ok(Json(NthResponse {
            n,
            num: Decimal(hit),
        }));
    }

    let limits = state.limits;
    let value = tokio::task::spawn_blocking(move || fib_nth_bounded(n, &limits)).await??;
    let value = Arc::new(value);
    state.nth_cache.lock().put(n, Arc::clone(&value));

    debug!(n, "computed nth value");
    Ok(Json(NthResponse {
        n,
        num: Decimal(value),
    }))
}

/// `GET /health`: liveness plus the current cache size.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cached = state.cache.try_lock().map(|cache| cache.len());
    Json(HealthResponse {
        status: "ok",
        cached,
    })
}
