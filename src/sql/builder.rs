//! Builds parameterized DDL, INSERT, SELECT, UPDATE and DELETE from an entity mapping.
//! Identifiers come from the static mappings only; values are always parameters.

use crate::model::{EntityMap, Record};
use crate::sql::PgBindValue;

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Id followed by every mapped column, in mapping order.
fn column_list(entity: &EntityMap) -> String {
    std::iter::once(entity.id_column)
        .chain(entity.fields.iter().map(|f| f.column))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// CREATE TABLE IF NOT EXISTS with a BIGSERIAL id; every attribute is NOT NULL with a zero default.
pub fn create_table(entity: &EntityMap) -> String {
    let mut defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted(entity.id_column))];
    for f in entity.fields {
        let mut def = format!(
            "{} {} NOT NULL DEFAULT {}",
            quoted(f.column),
            f.kind.sql_type(),
            f.kind.sql_default()
        );
        if f.unique {
            def.push_str(" UNIQUE");
        }
        defs.push(def);
    }
    format!("CREATE TABLE IF NOT EXISTS {} ({})", quoted(entity.table), defs.join(", "))
}

/// INSERT every mapped column; the store assigns the id.
pub fn insert(entity: &EntityMap, record: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(entity.fields.len());
    let mut placeholders = Vec::with_capacity(entity.fields.len());
    for f in entity.fields {
        let n = q.push_param(PgBindValue::for_field(f.kind, record.get(f.column)));
        cols.push(quoted(f.column));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(entity.table),
        cols.join(", "),
        placeholders.join(", "),
        column_list(entity)
    );
    q
}

pub fn select_by_id(entity: &EntityMap, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        column_list(entity),
        quoted(entity.table),
        quoted(entity.id_column),
        n
    );
    q
}

pub fn select_all(entity: &EntityMap) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(entity),
        quoted(entity.table),
        quoted(entity.id_column)
    );
    q
}

/// First row (lowest id) whose `column` equals `value`. Returns None for an unmapped column.
pub fn select_first_by_column(entity: &EntityMap, column: &str, value: &serde_json::Value) -> Option<QueryBuf> {
    let field = entity.field_by_column(column)?;
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::for_field(field.kind, Some(value)));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${} ORDER BY {} LIMIT 1",
        column_list(entity),
        quoted(entity.table),
        quoted(field.column),
        n,
        quoted(entity.id_column)
    );
    Some(q)
}

/// UPDATE every mapped column of the row identified by `id`.
pub fn update(entity: &EntityMap, id: i64, record: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(entity.fields.len());
    for f in entity.fields {
        let n = q.push_param(PgBindValue::for_field(f.kind, record.get(f.column)));
        sets.push(format!("{} = ${}", quoted(f.column), n));
    }
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(entity.table),
        sets.join(", "),
        quoted(entity.id_column),
        n,
        column_list(entity)
    );
    q
}

pub fn delete(entity: &EntityMap, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(entity.table),
        quoted(entity.id_column),
        n
    );
    q
}
