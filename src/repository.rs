//! Repository: entity-scoped create / read / update / delete / list over an injected record store.

use crate::error::AppError;
use crate::model::{EntityMap, Record};
use crate::store::RecordStore;
use serde_json::Value;
use std::sync::Arc;

const INTERNAL_ERROR: &str = "Internal Server Error";

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn RecordStore>,
    entity: &'static EntityMap,
}

impl Repository {
    pub fn new(store: Arc<dyn RecordStore>, entity: &'static EntityMap) -> Self {
        Repository { store, entity }
    }

    pub fn entity(&self) -> &'static EntityMap {
        self.entity
    }

    /// Insert a new row. Constraint violations surface as a store error.
    pub async fn create(&self, record: Record) -> Result<Record, AppError> {
        self.store
            .insert(self.entity, &record)
            .await
            .map_err(|e| AppError::store(self.entity.failure_message("create"), e))
    }

    pub async fn get(&self, id: i64) -> Result<Record, AppError> {
        self.store
            .find_by_id(self.entity, id)
            .await
            .map_err(|e| AppError::store(INTERNAL_ERROR, e))?
            .ok_or_else(|| self.not_found())
    }

    /// Every row; an empty table is an empty vec.
    pub async fn list(&self) -> Result<Vec<Record>, AppError> {
        self.store
            .find_all(self.entity)
            .await
            .map_err(|e| AppError::store(INTERNAL_ERROR, e))
    }

    /// First row whose `column` equals `value`, if any.
    pub async fn find_first_by(&self, column: &str, value: &Value) -> Result<Option<Record>, AppError> {
        self.store
            .find_first_by(self.entity, column, value)
            .await
            .map_err(|e| AppError::store(INTERNAL_ERROR, e))
    }

    /// Load the row, apply `patch` over it and write the whole record back.
    /// Columns absent from the patch keep their stored value.
    pub async fn update(&self, id: i64, patch: Record) -> Result<Record, AppError> {
        let mut current = self.get(id).await?;
        current.merge(patch);
        self.store
            .save(self.entity, id, &current)
            .await
            .map_err(|e| AppError::store(self.entity.failure_message("update"), e))?
            .ok_or_else(|| self.not_found())
    }

    /// Load the row, then remove it permanently.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.get(id).await?;
        let removed = self
            .store
            .delete(self.entity, id)
            .await
            .map_err(|e| AppError::store(self.entity.failure_message("delete"), e))?;
        if removed {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    fn not_found(&self) -> AppError {
        AppError::NotFound(self.entity.not_found_message())
    }
}
