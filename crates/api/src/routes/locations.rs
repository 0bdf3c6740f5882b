use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use foster_directory_core::canonical::{
    backfill_canonical_slugs, recompute_subtree, update_canonical_slug, BackfillReport, SlugUpdate,
};
use foster_directory_core::events::DirectoryEvent;
use foster_directory_core::{get_location_tree, LocationType, TreeNode};
use serde::{Deserialize, Serialize};

use super::parse_location_type;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/locations/tree", get(tree))
        .route("/v1/locations/backfill", post(backfill))
        .route(
            "/v1/locations/{location_type}/{id}/canonical-slug",
            post(update_slug),
        )
        .route("/v1/locations/{location_type}/{id}/recompute", post(recompute))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeQuery {
    #[serde(default)]
    include_content: bool,
}

async fn tree(State(state): State<AppState>, Query(query): Query<TreeQuery>) -> ApiResult<Json<Vec<TreeNode>>> {
    let tree = get_location_tree(state.store(), query.include_content).await?;
    Ok(Json(tree))
}

/// Recompute and store one node's canonical slug.
async fn update_slug(
    State(state): State<AppState>,
    Path((location_type, id)): Path<(String, String)>,
) -> ApiResult<Json<SlugUpdate>> {
    let location_type = parse_location_type(&location_type)?;
    let canonical_slug = update_canonical_slug(state.store(), &id, location_type).await?;

    let update = SlugUpdate {
        location_type,
        location_id: id,
        canonical_slug,
    };
    tracing::info!(
        location_type = %update.location_type,
        location_id = %update.location_id,
        canonical_slug = %update.canonical_slug,
        "Canonical slug updated"
    );
    state
        .event_bus()
        .publish(DirectoryEvent::slug_updated(update.clone()));
    Ok(Json(update))
}

#[derive(Debug, Serialize)]
struct RecomputeResponse {
    updated: Vec<SlugUpdate>,
}

/// Rewrite the canonical slugs of a node and everything below it.
async fn recompute(
    State(state): State<AppState>,
    Path((location_type, id)): Path<(String, String)>,
) -> ApiResult<Json<RecomputeResponse>> {
    let location_type = parse_location_type(&location_type)?;
    let updated = recompute_subtree(state.store(), location_type, &id).await?;

    let bus = state.event_bus();
    for update in &updated {
        bus.publish(DirectoryEvent::slug_updated(update.clone()));
    }
    bus.publish(DirectoryEvent::subtree_recomputed(location_type, &id, updated.len()));

    Ok(Json(RecomputeResponse { updated }))
}

/// Backfill every level, parents first. Per-record failures are reported in
/// the body rather than failing the request.
async fn backfill(State(state): State<AppState>) -> ApiResult<Json<BackfillReport>> {
    let report = backfill_canonical_slugs(state.store(), &LocationType::ALL).await?;

    let bus = state.event_bus();
    for update in &report.updated {
        bus.publish(DirectoryEvent::slug_updated(update.clone()));
    }
    bus.publish(DirectoryEvent::backfill_completed(report.summary()));

    Ok(Json(report))
}
