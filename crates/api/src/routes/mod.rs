pub mod content;
pub mod events;
pub mod health;
pub mod locations;
pub mod pages;
pub mod templates;

use axum::Router;
use foster_directory_core::LocationType;

use crate::error::ApiError;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(locations::routes())
        .merge(content::routes())
        .merge(events::routes())
        .merge(pages::routes())
        .merge(templates::routes())
        .with_state(state)
}

/// Parse a `{type}` path segment; `county` is accepted for regions.
fn parse_location_type(raw: &str) -> Result<LocationType, ApiError> {
    raw.parse::<LocationType>()
        .map_err(|err| ApiError::BadRequest(err.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use foster_directory_core::events::EventBus;
    use foster_directory_core::store::memory::MemoryStore;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::AppState;

    pub fn app(store: MemoryStore) -> Router {
        app_with_bus(Arc::new(store), EventBus::new(16))
    }

    pub fn app_with_bus(store: Arc<MemoryStore>, bus: EventBus) -> Router {
        super::build_router(AppState::new(store, bus))
    }

    pub async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri).await
    }

    pub async fn post_json(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::POST, uri).await
    }
}
