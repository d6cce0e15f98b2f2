//! REST API layer: route handlers, router composition and the OpenAPI
//! document.
//!
//! Catalog endpoints are mounted under `/api`; system endpoints sit at the
//! root.

pub mod handlers;

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::CorsPolicy;
use crate::domain::Product;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "GreenCart Backend", description = "Product catalog REST API"),
    paths(
        handlers::product::list_products,
        handlers::product::create_product,
        handlers::system::health_handler,
    ),
    components(schemas(Product, ErrorResponse, ErrorBody)),
    tags(
        (name = "Products", description = "Product catalog"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the CORS layer for `policy`.
///
/// This is the only place cross-origin rules are defined; individual
/// routes never override it.
#[must_use]
pub fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::Permissive => CorsLayer::permissive(),
        CorsPolicy::AllowList(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// Assembles the servable application: routes, OpenAPI UI (with the
/// `swagger-ui` feature), request tracing and CORS, bound to `state`.
pub fn build_app(state: AppState, cors: &CorsPolicy) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}
