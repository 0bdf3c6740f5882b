use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. The directory is read by public page renderers and
/// the admin UI; only GET and POST are served.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
