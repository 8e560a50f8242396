//! Router assembly.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::{auth_routes, product_routes, user_routes};

use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Swagger UI at /swagger-ui backed by /api-docs/openapi.json.
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Full application: resource, login, common and docs routes behind a permissive CORS policy.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(product_routes(state.clone()))
        .merge(auth_routes(state))
        .merge(docs_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
