//! HTTP API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Layers (outermost → innermost):
//! 1. CORS (all origins) → 2. HTTP trace spans → 3. Access log → 4. Body limit

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::endpoints::stubs::RouteGroup;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Handlers receive `State<ApiContext>`; the store behind it is whatever
/// the caller injected, so tests can substitute an in-memory store.
pub fn api_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.body_limit;

    let api = RouteGroup::ALL.into_iter().fold(
        Router::new()
            .route("/test", get(endpoints::health::api_test))
            .route("/patients", post(endpoints::patients::save)),
        |router, group| router.nest(group.prefix(), group.routes()),
    );

    Router::new()
        .route("/", get(endpoints::health::root))
        .nest("/api", api)
        .fallback(endpoints::health::not_found)
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::access_log::log_access))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
