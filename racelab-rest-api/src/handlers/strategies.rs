//! Strategy endpoints
//!
//! One pair of routes per strategy: `GET /{endpoint}/{id}` and
//! `GET /{endpoint}/{id}/{timeout_ms}`. The timeout segment is parsed by
//! hand so a non-numeric value surfaces as a 400 with the standard error
//! envelope rather than axum's default rejection body.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use racelab_core::{
    RequestContext, SAFE_PROTOTYPE_ENDPOINT, SAFE_SINGLETON_ENDPOINT, UNSAFE_ENDPOINT,
};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    models::StrategyResponse,
};

/// Applied when the caller omits the `{timeout_ms}` segment.
pub const DEFAULT_TIMEOUT_MS: u64 = 100;

async fn dispatch(
    ctx: AppContext,
    endpoint: &'static str,
    id: String,
    raw_timeout: Option<String>,
) -> RestResult<Json<StrategyResponse>> {
    if id.trim().is_empty() {
        return Err(RestError::bad_request("id must not be empty"));
    }

    let delay_ms = match raw_timeout {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            RestError::bad_request(format!(
                "timeout_ms must be a non-negative integer, got '{raw}'"
            ))
        })?,
        None => DEFAULT_TIMEOUT_MS,
    };

    info!(endpoint, %id, delay_ms, "handling strategy call");

    let record = ctx
        .dispatcher
        .route(endpoint, RequestContext::new(id, delay_ms))
        .await?;

    Ok(Json(StrategyResponse::from(record)))
}

pub async fn shared_mutable(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> RestResult<Json<StrategyResponse>> {
    dispatch(ctx, UNSAFE_ENDPOINT, id, None).await
}

pub async fn shared_mutable_with_timeout(
    State(ctx): State<AppContext>,
    Path((id, timeout_ms)): Path<(String, String)>,
) -> RestResult<Json<StrategyResponse>> {
    dispatch(ctx, UNSAFE_ENDPOINT, id, Some(timeout_ms)).await
}

pub async fn per_call_instance(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> RestResult<Json<StrategyResponse>> {
    dispatch(ctx, SAFE_PROTOTYPE_ENDPOINT, id, None).await
}

pub async fn per_call_instance_with_timeout(
    State(ctx): State<AppContext>,
    Path((id, timeout_ms)): Path<(String, String)>,
) -> RestResult<Json<StrategyResponse>> {
    dispatch(ctx, SAFE_PROTOTYPE_ENDPOINT, id, Some(timeout_ms)).await
}

pub async fn call_local(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> RestResult<Json<StrategyResponse>> {
    dispatch(ctx, SAFE_SINGLETON_ENDPOINT, id, None).await
}

pub async fn call_local_with_timeout(
    State(ctx): State<AppContext>,
    Path((id, timeout_ms)): Path<(String, String)>,
) -> RestResult<Json<StrategyResponse>> {
    dispatch(ctx, SAFE_SINGLETON_ENDPOINT, id, Some(timeout_ms)).await
}
