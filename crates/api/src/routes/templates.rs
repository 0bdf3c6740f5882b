use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use foster_directory_core::content::{default_content, template_for, ContentSeed, LocationTemplate};
use serde::Deserialize;
use serde_json::Value;

use super::parse_location_type;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/templates/{location_type}", get(template))
        .route("/v1/templates/{location_type}/defaults", get(defaults))
}

/// Section schema the editor renders for one level.
async fn template(Path(location_type): Path<String>) -> ApiResult<Json<&'static LocationTemplate>> {
    let location_type = parse_location_type(&location_type)?;
    Ok(Json(template_for(location_type)))
}

#[derive(Debug, Deserialize)]
struct DefaultsQuery {
    name: Option<String>,
    slug: Option<String>,
    canonical_slug: Option<String>,
}

/// Preview of the content a page gets before anyone edits it.
async fn defaults(
    Path(location_type): Path<String>,
    Query(query): Query<DefaultsQuery>,
) -> ApiResult<Json<Value>> {
    let location_type = parse_location_type(&location_type)?;
    let seed = ContentSeed {
        name: query.name,
        slug: query.slug,
        location_type: Some(location_type),
        canonical_slug: query.canonical_slug,
    };
    Ok(Json(default_content(&seed)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use foster_directory_core::store::memory::MemoryStore;

    use crate::routes::test_support::{app, get_json};

    #[tokio::test]
    async fn county_template() {
        let (status, body) = get_json(app(MemoryStore::new()), "/v1/templates/county").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], "region");
        assert_eq!(body["sections"][5]["key"], "popularCities");
    }

    #[tokio::test]
    async fn unknown_template() {
        let (status, _) = get_json(app(MemoryStore::new()), "/v1/templates/village").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn default_preview() {
        let (status, body) = get_json(
            app(MemoryStore::new()),
            "/v1/templates/country/defaults?name=Wales&slug=wales",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], "/foster-agency/wales");
        assert_eq!(body["overview"]["title"], "About Fostering in Wales");
    }
}
