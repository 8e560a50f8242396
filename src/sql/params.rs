//! Typed bind values for generated statements.

use crate::model::FieldKind;
use serde_json::Value;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    I64(i64),
    F64(f64),
    Text(String),
}

impl PgBindValue {
    /// Convert a record value for a column of `kind`. Missing or mistyped values bind as the zero value.
    pub fn for_field(kind: FieldKind, value: Option<&Value>) -> Self {
        match kind {
            FieldKind::Text => PgBindValue::Text(value.and_then(Value::as_str).unwrap_or_default().to_string()),
            FieldKind::Float => PgBindValue::F64(value.and_then(Value::as_f64).unwrap_or(0.0)),
        }
    }

    pub fn bind<'q>(self, query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments> {
        match self {
            PgBindValue::I64(n) => query.bind(n),
            PgBindValue::F64(n) => query.bind(n),
            PgBindValue::Text(s) => query.bind(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_values_bind_as_zero() {
        assert_eq!(PgBindValue::for_field(FieldKind::Text, None), PgBindValue::Text(String::new()));
        assert_eq!(PgBindValue::for_field(FieldKind::Float, None), PgBindValue::F64(0.0));
    }

    #[test]
    fn values_keep_their_kind() {
        assert_eq!(
            PgBindValue::for_field(FieldKind::Float, Some(&json!(4.5))),
            PgBindValue::F64(4.5)
        );
        assert_eq!(
            PgBindValue::for_field(FieldKind::Text, Some(&json!("desk"))),
            PgBindValue::Text("desk".into())
        );
    }
}
