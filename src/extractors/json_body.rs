//! JSON body extractor that ignores Content-Type and rejects with the API's error body.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// Request body parsed as JSON. Any read or parse failure is a 400 `{"error": ...}`.
#[derive(Clone, Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let value = serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(JsonBody(value))
    }
}
