use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::conf::StatusCatalog;
use crate::model::LoadId;
use crate::source::LoadPage;
use crate::table::TableQuery;

use super::error::ApiError;
use super::state::AppState;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn statuses(State(state): State<AppState>) -> Json<StatusCatalog> {
    Json(state.catalog.as_ref().clone())
}

pub async fn query_loads(
    State(state): State<AppState>,
    Json(query): Json<TableQuery>,
) -> Result<Json<LoadPage>, ApiError> {
    let page = state.source.list(&query).await?;
    Ok(Json(page))
}

pub async fn delete_load(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.source.delete(&LoadId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
