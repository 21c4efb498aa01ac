//! HTTP API route definitions.

use axum::http::{header, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{check, execute, AppState};

/// Create the API router.
///
/// CORS applies to `/api/*` only: any origin is accepted (mirrored back,
/// since a wildcard cannot be combined with credentials), GET/POST, with
/// credentials allowed. The health endpoint sits outside the CORS layer.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let api = Router::new()
        .route("/api/execute", post(execute))
        .layer(cors);

    Router::new()
        .route("/check", get(check))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
