//! Response bodies and helpers shared by handlers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Product not found")]
    pub error: String,
}

/// Body of confirmation responses (delete, login).
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

pub fn created(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(data))
}

pub fn message(text: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: text.into(),
        }),
    )
}
