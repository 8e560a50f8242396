//! Typed errors and HTTP mapping.

use crate::response::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Failure reported by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("unique constraint {constraint} violated on {table}")]
    UniqueViolation {
        table: &'static str,
        constraint: String,
    },
    #[error("invalid database url: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// Classify a sqlx error for `table`, pulling out unique violations.
    pub fn from_sqlx(table: &'static str, err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if db.is_unique_violation() {
                return StoreError::UniqueViolation {
                    table,
                    constraint: db.constraint().unwrap_or_default().to_string(),
                };
            }
        }
        StoreError::Db(err)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    /// Store failure; `message` is what the client sees, `source` is only logged.
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn store(message: impl Into<String>, source: StoreError) -> Self {
        AppError::Store {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { message, source } = &self {
            tracing::error!(error = %source, "{}", message);
        }
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_renders_flat_error_body() {
        let resp = AppError::NotFound("Product not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, serde_json::json!({"error": "Product not found"}));
    }

    #[tokio::test]
    async fn store_error_hides_source() {
        let err = AppError::store("Failed to create user", StoreError::Db(sqlx::Error::PoolTimedOut));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, serde_json::json!({"error": "Failed to create user"}));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_database_sqlx_error_stays_db() {
        let err = StoreError::from_sqlx("users", sqlx::Error::PoolClosed);
        assert!(matches!(err, StoreError::Db(sqlx::Error::PoolClosed)));
    }
}
