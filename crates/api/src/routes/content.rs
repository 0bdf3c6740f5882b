use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use foster_directory_core::content::{get_location_content_by_canonical_slug, get_location_content_by_slug};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Raw stored content. Both lookups answer `null` when nothing is saved.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/content/canonical", get(by_canonical_slug))
        .route("/v1/content/legacy/{slug}", get(by_legacy_slug))
}

#[derive(Debug, Deserialize)]
struct CanonicalQuery {
    slug: Option<String>,
}

async fn by_canonical_slug(
    State(state): State<AppState>,
    Query(query): Query<CanonicalQuery>,
) -> ApiResult<Json<Option<Value>>> {
    let slug = query
        .slug
        .filter(|slug| !slug.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("slug query parameter is required".to_string()))?;
    Ok(Json(
        get_location_content_by_canonical_slug(state.store(), &slug).await,
    ))
}

async fn by_legacy_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Json<Option<Value>> {
    Json(get_location_content_by_slug(state.store(), &slug).await)
}
