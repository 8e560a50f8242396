//! Record store: the persistence primitives repositories are built on, and the PostgreSQL implementation.

use crate::error::StoreError;
use crate::model::{float_value, EntityMap, FieldKind, Record};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;

/// Create / find / save / delete primitives keyed by entity mapping.
/// Each call is one store interaction; implementations hold no per-request state.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new row and return it with the assigned id.
    async fn insert(&self, entity: &'static EntityMap, record: &Record) -> Result<Record, StoreError>;

    async fn find_by_id(&self, entity: &'static EntityMap, id: i64) -> Result<Option<Record>, StoreError>;

    /// All rows in ascending id order.
    async fn find_all(&self, entity: &'static EntityMap) -> Result<Vec<Record>, StoreError>;

    /// First row (lowest id) whose `column` equals `value`.
    async fn find_first_by(
        &self,
        entity: &'static EntityMap,
        column: &str,
        value: &Value,
    ) -> Result<Option<Record>, StoreError>;

    /// Write every mapped column of `record` to the row `id`. None if that row no longer exists.
    async fn save(&self, entity: &'static EntityMap, id: i64, record: &Record) -> Result<Option<Record>, StoreError>;

    /// Returns true if a row was removed.
    async fn delete(&self, entity: &'static EntityMap, id: i64) -> Result<bool, StoreError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// PostgreSQL record store over a shared pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// CREATE TABLE IF NOT EXISTS for each entity.
    pub async fn ensure_tables(&self, entities: &[&'static EntityMap]) -> Result<(), StoreError> {
        for entity in entities {
            let ddl = sql::create_table(entity);
            tracing::debug!(sql = %ddl, "ensure table");
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn fetch_optional(&self, entity: &'static EntityMap, q: QueryBuf) -> Result<Option<Record>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = p.bind(query);
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(entity.table, e))?;
        row.map(|r| row_to_record(entity, &r)).transpose()
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert(&self, entity: &'static EntityMap, record: &Record) -> Result<Record, StoreError> {
        self.fetch_optional(entity, sql::insert(entity, record))
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    async fn find_by_id(&self, entity: &'static EntityMap, id: i64) -> Result<Option<Record>, StoreError> {
        self.fetch_optional(entity, sql::select_by_id(entity, id)).await
    }

    async fn find_all(&self, entity: &'static EntityMap) -> Result<Vec<Record>, StoreError> {
        let q = sql::select_all(entity);
        tracing::debug!(sql = %q.sql, "query");
        let rows = sqlx::query(&q.sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(entity.table, e))?;
        rows.iter().map(|r| row_to_record(entity, r)).collect()
    }

    async fn find_first_by(
        &self,
        entity: &'static EntityMap,
        column: &str,
        value: &Value,
    ) -> Result<Option<Record>, StoreError> {
        match sql::select_first_by_column(entity, column, value) {
            Some(q) => self.fetch_optional(entity, q).await,
            None => Ok(None),
        }
    }

    async fn save(&self, entity: &'static EntityMap, id: i64, record: &Record) -> Result<Option<Record>, StoreError> {
        self.fetch_optional(entity, sql::update(entity, id, record)).await
    }

    async fn delete(&self, entity: &'static EntityMap, id: i64) -> Result<bool, StoreError> {
        let q = sql::delete(entity, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = p.bind(query);
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(entity.table, e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_record(entity: &EntityMap, row: &PgRow) -> Result<Record, StoreError> {
    let mut record = Record::with_id(row.try_get::<i64, _>(entity.id_column)?);
    for f in entity.fields {
        let value = match f.kind {
            FieldKind::Text => Value::String(row.try_get::<String, _>(f.column)?),
            FieldKind::Float => float_value(row.try_get::<f64, _>(f.column)?),
        };
        record.set(f.column, value);
    }
    Ok(record)
}

/// Connect to the server's `postgres` database and CREATE DATABASE if the target does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a URL into (same server's `postgres` database URL, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::InvalidUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
