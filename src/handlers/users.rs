//! User routes' handlers.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::entity;
use crate::openapi::{UserInput, UserView};
use crate::response::{ErrorBody, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 500, description = "Store failure, e.g. duplicate username", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    entity::create(&state.users, body).await
}

#[utoipa::path(
    get,
    path = "/api/users/",
    responses(
        (status = 200, description = "All users", body = [UserView]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    entity::list(&state.users).await
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    entity::read(&state.users, &id).await
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserInput,
    responses(
        (status = 200, description = "Updated user", body = UserView),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    entity::update(&state.users, &id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    entity::delete(&state.users, &id).await
}
