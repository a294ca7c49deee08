use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::debug;

use crate::location::{annotate, AnnotatedLocation, Level};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub address: Option<String>,
}

pub(super) async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<AnnotatedLocation>, ApiError> {
    let address = match params.address {
        Some(a) if !a.trim().is_empty() => a,
        _ => return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'address' parameter")),
    };

    let resolved = state.resolver().resolve(&address);
    Ok(Json(AnnotatedLocation {
        location: Some(address),
        resolved,
    }))
}

// ─── POST /api/resolve ───────────────────────────────────────────

/// Body is a JSON array of strings or nulls; the response keeps positions.
/// Resolution runs on the blocking pool so large batches leave the async
/// workers free.
pub(super) async fn resolve_batch(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<Vec<Option<String>>>,
) -> Result<Json<Vec<AnnotatedLocation>>, ApiError> {
    let start = Instant::now();
    let rows = task::spawn_blocking(move || annotate(&state.resolver(), &inputs, state.parallel))
        .await
        .map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Batch resolution failed: {}", e),
            )
        })?;
    debug!(
        count = rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch request"
    );
    Ok(Json(rows))
}

// ─── GET /api/dictionary ─────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DictionaryStats {
    pub provinces: usize,
    pub cities: usize,
    pub counties: usize,
    pub counties_legacy: usize,
}

pub(super) async fn dictionary_stats(State(state): State<Arc<AppState>>) -> Json<DictionaryStats> {
    let store = &state.store;
    Json(DictionaryStats {
        provinces: store.len(Level::Province),
        cities: store.len(Level::City),
        counties: store.len(Level::County),
        counties_legacy: store.len(Level::LegacyCounty),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{BuiltinProvider, DictionaryStore};
    use std::time::Duration;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            store: DictionaryStore::from_provider(&BuiltinProvider).unwrap(),
            parallel: false,
        })
    }

    #[tokio::test]
    async fn test_resolve_single() {
        let query = ResolveQuery {
            address: Some(" 浙江省杭州市西湖区 ".to_string()),
        };
        let Json(row) = resolve(State(state()), Query(query)).await.ok().unwrap();
        assert_eq!(row.location.as_deref(), Some(" 浙江省杭州市西湖区 "));
        assert_eq!(row.resolved.county_code, Some(330106));
    }

    #[tokio::test]
    async fn test_resolve_missing_address() {
        let query = ResolveQuery { address: None };
        let err = resolve(State(state()), Query(query)).await.err().unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let query = ResolveQuery {
            address: Some("   ".to_string()),
        };
        assert!(resolve(State(state()), Query(query)).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_batch_keeps_positions() {
        let inputs = vec![Some("深圳市南山区".to_string()), None, Some("无此地".to_string())];
        let Json(rows) = resolve_batch(State(state()), Json(inputs)).await.ok().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].resolved.province.as_deref(), Some("广东省"));
        assert!(rows[1].location.is_none() && rows[1].resolved.is_empty());
        assert!(rows[2].resolved.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_resolve_batch_leaves_worker_free() {
        let inputs: Vec<Option<String>> = (0..200_000)
            .map(|i| Some(format!("广东省深圳市南山区科技园{}号", i)))
            .collect();

        let start = Instant::now();
        let batch = tokio::spawn(async move {
            let Json(rows) = resolve_batch(State(state()), Json(inputs)).await.ok().unwrap();
            (rows.len(), start.elapsed())
        });
        let timer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            start.elapsed()
        });

        let timer_fired = timer.await.unwrap();
        let (count, batch_done) = batch.await.unwrap();
        assert_eq!(count, 200_000);
        assert!(
            timer_fired < batch_done,
            "timer at {:?} waited for batch finishing at {:?}",
            timer_fired,
            batch_done
        );
    }

    #[tokio::test]
    async fn test_dictionary_stats() {
        let Json(stats) = dictionary_stats(State(state())).await;
        assert!(stats.provinces > 0);
        assert!(stats.counties > stats.cities);
    }
}
