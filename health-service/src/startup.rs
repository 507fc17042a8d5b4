use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use service_core::middleware::tracing::request_id_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::health::{
    create_health, delete_health, get_health, list_health, update_health,
};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health/all", get(list_health))
        .route(
            "/health/:person_id",
            get(get_health)
                .post(create_health)
                .put(update_health)
                .delete(delete_health),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .layer(CorsLayer::permissive())
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
