//! Product routes' handlers.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::entity;
use crate::openapi::{ProductInput, ProductView};
use crate::response::{ErrorBody, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/api/products/",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductView),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    entity::create(&state.products, body).await
}

#[utoipa::path(
    get,
    path = "/api/products/",
    responses(
        (status = 200, description = "All products", body = [ProductView]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    entity::list(&state.products).await
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductView),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    entity::read(&state.products, &id).await
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Updated product", body = ProductView),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    entity::update(&state.products, &id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    entity::delete(&state.products, &id).await
}
