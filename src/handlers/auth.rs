//! Login stub.
//!
//! Looks a user up by email and reports success when one exists. The password
//! is decoded but NOT verified: this endpoint performs no authentication.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{message, ErrorBody, MessageBody};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "A user with this email exists (password is not checked)", body = MessageBody),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 401, description = "No user with this email", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let req: LoginRequest = serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let found = match state
        .users
        .find_first_by("email", &serde_json::Value::String(req.email))
        .await
    {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = ?e, "login lookup failed");
            None
        }
    };
    match found {
        Some(user) => {
            tracing::info!(id = ?user.id, "login accepted without password check");
            Ok(message("Login successful"))
        }
        None => Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    }
}
