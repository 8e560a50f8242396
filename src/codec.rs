//! JSON <-> record conversion through entity mappings.
//! Request keys are JSON keys from the mapping; records are keyed by column. Write-only fields never leave.

use crate::error::AppError;
use crate::model::{EntityMap, FieldMap, Record};
use serde_json::{Map, Value};

fn body_to_map(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn decode_field(entity: &EntityMap, field: &FieldMap, value: &Value) -> Result<Value, AppError> {
    field.kind.coerce(value).ok_or_else(|| {
        AppError::BadRequest(format!(
            "cannot decode {} into field {}.{} of type {}",
            json_type_name(value),
            entity.name,
            field.json_key,
            field.kind.json_type()
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a create payload. Omitted attributes take their zero value; unknown keys and `id` are ignored.
pub fn decode_new(entity: &EntityMap, body: Value) -> Result<Record, AppError> {
    let map = body_to_map(body)?;
    let mut record = Record::new();
    for f in entity.fields {
        let value = match map.get(f.json_key) {
            Some(v) => decode_field(entity, f, v)?,
            None => f.kind.zero(),
        };
        record.set(f.column, value);
    }
    Ok(record)
}

/// Decode an update payload into a patch holding only the attributes present in the body.
pub fn decode_patch(entity: &EntityMap, body: Value) -> Result<Record, AppError> {
    let map = body_to_map(body)?;
    let mut patch = Record::new();
    for f in entity.fields {
        if let Some(v) = map.get(f.json_key) {
            patch.set(f.column, decode_field(entity, f, v)?);
        }
    }
    Ok(patch)
}

/// Response JSON for one record: id plus every readable field under its JSON key.
pub fn encode(entity: &EntityMap, record: &Record) -> Value {
    let mut out = Map::new();
    if let Some(id) = record.id {
        out.insert(entity.id_json_key.to_string(), Value::Number(id.into()));
    }
    for f in entity.readable_fields() {
        let value = record.get(f.column).cloned().unwrap_or_else(|| f.kind.zero());
        out.insert(f.json_key.to_string(), value);
    }
    Value::Object(out)
}

pub fn encode_all(entity: &EntityMap, records: &[Record]) -> Value {
    Value::Array(records.iter().map(|r| encode(entity, r)).collect())
}
