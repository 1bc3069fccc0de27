//! Router construction and middleware layering.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = state.config.max_request_body_bytes();

    Router::new()
        .route("/", get(handlers::form::form_page))
        .route("/health", get(handlers::health::health))
        .route("/api/v0/submissions", post(handlers::submit::submit_expense))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        // Applied as separate layers (innermost first) so the response body is
        // re-boxed between them; bundling in one ServiceBuilder would place Cors
        // directly outside RequestBodyLimit, and CorsLayer requires the inner
        // body to implement Default. Request flow: Trace -> Cors -> RequestBodyLimit -> Route.
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Axum's default 2 MB body cap would reject multi-receipt uploads.
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
