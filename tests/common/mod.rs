//! Shared test support: an in-memory record store and request helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use catalog_api::{app, AppState, EntityMap, Record, RecordStore, StoreError};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Record>,
}

/// Record store kept in memory. Enforces the mapping's unique columns like the database does.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Make every subsequent call fail as if the connection were gone.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Stored row, including write-only columns.
    pub fn row(&self, entity: &'static EntityMap, id: i64) -> Option<Record> {
        let tables = self.tables.lock().unwrap();
        tables.get(entity.table).and_then(|t| t.rows.get(&id).cloned())
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn check_unique(entity: &'static EntityMap, table: &Table, id: Option<i64>, record: &Record) -> Result<(), StoreError> {
        for f in entity.fields.iter().filter(|f| f.unique) {
            let clash = table
                .rows
                .iter()
                .any(|(row_id, row)| Some(*row_id) != id && row.get(f.column) == record.get(f.column));
            if clash {
                return Err(StoreError::UniqueViolation {
                    table: entity.table,
                    constraint: format!("{}_{}_key", entity.table, f.column),
                });
            }
        }
        Ok(())
    }

    /// Keep only mapped columns, filling absent ones with their zero value.
    fn normalize(entity: &'static EntityMap, id: i64, record: &Record) -> Record {
        let mut row = Record::with_id(id);
        for f in entity.fields {
            row.set(f.column, record.get(f.column).cloned().unwrap_or_else(|| f.kind.zero()));
        }
        row
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, entity: &'static EntityMap, record: &Record) -> Result<Record, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(entity.table).or_default();
        Self::check_unique(entity, table, None, record)?;
        table.next_id += 1;
        let row = Self::normalize(entity, table.next_id, record);
        table.rows.insert(table.next_id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, entity: &'static EntityMap, id: i64) -> Result<Option<Record>, StoreError> {
        self.check()?;
        Ok(self.row(entity, id))
    }

    async fn find_all(&self, entity: &'static EntityMap) -> Result<Vec<Record>, StoreError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(entity.table)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_first_by(
        &self,
        entity: &'static EntityMap,
        column: &str,
        value: &Value,
    ) -> Result<Option<Record>, StoreError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(entity.table)
            .and_then(|t| t.rows.values().find(|r| r.get(column) == Some(value)).cloned()))
    }

    async fn save(&self, entity: &'static EntityMap, id: i64, record: &Record) -> Result<Option<Record>, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(entity.table).or_default();
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        Self::check_unique(entity, table, Some(id), record)?;
        let row = Self::normalize(entity, id, record);
        table.rows.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, entity: &'static EntityMap, id: i64) -> Result<bool, StoreError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .get_mut(entity.table)
            .map(|t| t.rows.remove(&id).is_some())
            .unwrap_or(false))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let router = app(AppState::new(store.clone()));
        TestApp { router, store }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        self.send_request(req).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let req = Request::builder().method(method).uri(uri).body(Body::from(body)).unwrap();
        self.send_request(req).await
    }

    async fn send_request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}
