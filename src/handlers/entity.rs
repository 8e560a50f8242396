//! Resource handlers shared by users and products: decode, one repository call, encode.

use crate::codec;
use crate::error::AppError;
use crate::repository::Repository;
use crate::response::{created, message, ok, MessageBody};
use axum::{http::StatusCode, Json};
use serde_json::Value;

pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

pub(crate) async fn create(repo: &Repository, body: Value) -> Result<(StatusCode, Json<Value>), AppError> {
    let entity = repo.entity();
    let record = codec::decode_new(entity, body)?;
    let row = repo.create(record).await?;
    tracing::info!(entity = entity.name, id = ?row.id, "created");
    Ok(created(codec::encode(entity, &row)))
}

pub(crate) async fn list(repo: &Repository) -> Result<(StatusCode, Json<Value>), AppError> {
    let rows = repo.list().await?;
    Ok(ok(codec::encode_all(repo.entity(), &rows)))
}

pub(crate) async fn read(repo: &Repository, id_str: &str) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = parse_id(id_str)?;
    let row = repo.get(id).await?;
    Ok(ok(codec::encode(repo.entity(), &row)))
}

pub(crate) async fn update(
    repo: &Repository,
    id_str: &str,
    body: Value,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let entity = repo.entity();
    let id = parse_id(id_str)?;
    let patch = codec::decode_patch(entity, body)?;
    let row = repo.update(id, patch).await?;
    tracing::info!(entity = entity.name, id, "updated");
    Ok(ok(codec::encode(entity, &row)))
}

pub(crate) async fn delete(repo: &Repository, id_str: &str) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    let entity = repo.entity();
    let id = parse_id(id_str)?;
    repo.delete(id).await?;
    tracing::info!(entity = entity.name, id, "deleted");
    Ok(message(entity.deleted_message()))
}
