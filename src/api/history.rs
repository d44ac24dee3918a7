use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::validation::{validate_limit, validate_record_id};
use super::{ApiError, ApiResponse, AppState, HistoryQuery, HistoryResponse};
use crate::constants::limits::DEFAULT_HISTORY_LIMIT;
use crate::models::query::QueryRecord;

/// `GET /api/history?limit=N`
///
/// Most recent exchanges first.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<HistoryResponse>>, ApiError> {
    let Query(query) = query?;
    let limit = validate_limit(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))?;

    let records = state.store().recent_queries(limit).await?;
    let total = state.store().count_queries().await?;

    Ok(Json(ApiResponse::success(HistoryResponse { records, total })))
}

/// `GET /api/history/{id}`
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<QueryRecord>>, ApiError> {
    let Path(id) = id?;
    let id = validate_record_id(id)?;

    let record = state
        .store()
        .get_query(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Query", id))?;

    Ok(Json(ApiResponse::success(record)))
}
