//! Entity mappings: one static table per entity relating field name, column name and JSON key.
//! DDL, SQL generation, request decoding and response encoding all read from these tables.

use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Storage type of a mapped attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
}

impl FieldKind {
    /// PostgreSQL column type.
    pub fn sql_type(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Float => "DOUBLE PRECISION",
        }
    }

    /// Column default used in DDL.
    pub fn sql_default(self) -> &'static str {
        match self {
            FieldKind::Text => "''",
            FieldKind::Float => "0",
        }
    }

    /// Value an attribute takes when a create payload omits it.
    pub fn zero(self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Float => float_value(0.0),
        }
    }

    /// Name used in decode error messages.
    pub fn json_type(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Float => "number",
        }
    }

    /// Normalize a JSON value to this kind, or None if the value has the wrong type.
    /// Floats are always stored as f64 numbers so `10` and `10.0` compare equal.
    pub fn coerce(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (FieldKind::Text, Value::String(s)) => Some(Value::String(s.clone())),
            (FieldKind::Float, Value::Number(n)) => n.as_f64().map(float_value),
            _ => None,
        }
    }
}

/// JSON number from an f64. JSON input is always finite; NaN and infinities collapse to zero.
pub fn float_value(f: f64) -> Value {
    Number::from_f64(f)
        .or_else(|| Number::from_f64(0.0))
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[derive(Clone, Copy, Debug)]
pub struct FieldMap {
    /// Attribute name used in logs and docs.
    pub field: &'static str,
    pub column: &'static str,
    pub json_key: &'static str,
    pub kind: FieldKind,
    /// Enforced by a UNIQUE constraint in the store.
    pub unique: bool,
    /// Accepted on input, never written to a response.
    pub write_only: bool,
}

impl FieldMap {
    const fn new(field: &'static str, column: &'static str, json_key: &'static str, kind: FieldKind) -> Self {
        FieldMap {
            field,
            column,
            json_key,
            kind,
            unique: false,
            write_only: false,
        }
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    const fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }
}

/// Mapping for one entity. The identity is always a store-assigned BIGINT.
#[derive(Debug)]
pub struct EntityMap {
    /// Display name, e.g. "User".
    pub name: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
    pub id_json_key: &'static str,
    /// Mutable attributes in column order.
    pub fields: &'static [FieldMap],
}

impl EntityMap {
    pub fn field_by_column(&self, column: &str) -> Option<&FieldMap> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// Fields that appear in responses.
    pub fn readable_fields(&self) -> impl Iterator<Item = &FieldMap> {
        self.fields.iter().filter(|f| !f.write_only)
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.name)
    }

    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully", self.name)
    }

    /// Message for a failed write, e.g. "Failed to create product".
    pub fn failure_message(&self, action: &str) -> String {
        format!("Failed to {} {}", action, self.name.to_lowercase())
    }
}

pub static USER: EntityMap = EntityMap {
    name: "User",
    table: "users",
    id_column: "id",
    id_json_key: "id",
    fields: &[
        FieldMap::new("username", "username", "username", FieldKind::Text).unique(),
        FieldMap::new("password", "password", "password", FieldKind::Text).write_only(),
        FieldMap::new("display_name", "name", "name", FieldKind::Text),
        FieldMap::new("email", "email", "email", FieldKind::Text),
    ],
};

pub static PRODUCT: EntityMap = EntityMap {
    name: "Product",
    table: "products",
    id_column: "id",
    id_json_key: "id",
    fields: &[
        FieldMap::new("product_name", "name", "name", FieldKind::Text),
        FieldMap::new("price", "price", "price", FieldKind::Float),
    ],
};

/// Every entity whose table is ensured at startup.
pub static ENTITIES: &[&EntityMap] = &[&USER, &PRODUCT];

/// One row of an entity, keyed by column name. `id` is None until the store assigns it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    pub id: Option<i64>,
    values: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: i64) -> Self {
        Record {
            id: Some(id),
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// Overwrite every column present in `patch`; columns absent from it keep their value.
    pub fn merge(&mut self, patch: Record) {
        self.values.extend(patch.values);
    }
}
