use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use foster_directory_core::content::{resolve_page, ResolvedPage};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/pages/{*path}", get(page))
}

/// Content for a location page, saved or generated. Any one-to-three
/// segment path resolves, whether or not the location exists.
async fn page(State(state): State<AppState>, Path(path): Path<String>) -> ApiResult<Json<ResolvedPage>> {
    resolve_page(state.store(), &path)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("not a location page: /{path}")))
}
