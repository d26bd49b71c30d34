use serde_json::{json, Map, Value as JsonValue};
use thiserror::Error;

use crate::color::ColorParseError;
use crate::{Color, Value};

/// Errors produced while converting JSON into [`Value`].
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("value json: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error("json null does not describe a value")]
    Null,
}

/// True when `obj` unambiguously describes a single value rather than a
/// nested mapping: the canonical `{ "type": ..., "data": ... }` layout or a
/// bare color object carrying its `mode` marker (the shape colors take in
/// schema exports). Single-key shorthands such as `{ "color": "#fff" }` are
/// not included; [`parse_value`] still accepts them where a value is expected.
pub fn is_value_object(obj: &Map<String, JsonValue>) -> bool {
    if obj.contains_key("type") && obj.contains_key("data") {
        return true;
    }
    obj.get("mode").map(|m| m.is_string()).unwrap_or(false)
}

/// Normalize shorthand `Value` JSON into the canonical `{ "type": ..., "data": ... }`
/// representation understood by the serde derives on [`Value`]. Accepts
/// primitives (`1.0`, `true`, `"name"`), numeric arrays of length 2/3 (vectors),
/// single-key shorthands and bare color objects.
pub fn normalize_value_json(value: JsonValue) -> Result<JsonValue, JsonError> {
    match value {
        JsonValue::Null => Err(JsonError::Null),
        JsonValue::Number(n) => Ok(json!({ "type": "number", "data": n })),
        JsonValue::Bool(b) => Ok(json!({ "type": "bool", "data": b })),
        JsonValue::String(s) => Ok(json!({ "type": "text", "data": s })),
        JsonValue::Array(arr) => Ok(json!({ "type": "vector", "data": vector_from_array(&arr) })),
        JsonValue::Object(obj) => normalize_object(obj),
    }
}

fn vector_from_array(arr: &[JsonValue]) -> JsonValue {
    let mut data = Map::new();
    for (axis, item) in ["x", "y", "z"].iter().zip(arr.iter()) {
        if let Some(n) = item.as_f64() {
            data.insert((*axis).to_string(), json!(n));
        }
    }
    JsonValue::Object(data)
}

fn color_json(color: Color) -> Result<JsonValue, JsonError> {
    Ok(json!({ "type": "color", "data": serde_json::to_value(color)? }))
}

fn normalize_object(obj: Map<String, JsonValue>) -> Result<JsonValue, JsonError> {
    if obj.contains_key("type") && obj.contains_key("data") {
        return Ok(JsonValue::Object(obj));
    }
    if let Some(n) = obj.get("number").and_then(|x| x.as_f64()) {
        return Ok(json!({ "type": "number", "data": n }));
    }
    if let Some(text) = obj.get("text").and_then(|x| x.as_str()) {
        return Ok(json!({ "type": "text", "data": text }));
    }
    if let Some(color) = obj.get("color") {
        return match color {
            JsonValue::String(s) => color_json(Color::from_css(s)?),
            JsonValue::Array(items) => {
                let ch: Vec<f64> = items.iter().filter_map(|x| x.as_f64()).collect();
                match ch.as_slice() {
                    [r, g, b] => color_json(Color::rgb(*r, *g, *b)),
                    [r, g, b, a] => color_json(Color::rgba(*r, *g, *b, *a)),
                    _ => Err(ColorParseError::Css(color.to_string()).into()),
                }
            }
            other => Ok(json!({ "type": "color", "data": other })),
        };
    }
    if let Some(vector) = obj.get("vector") {
        return Ok(match vector {
            JsonValue::Array(arr) => json!({ "type": "vector", "data": vector_from_array(arr) }),
            other => json!({ "type": "vector", "data": other }),
        });
    }
    if obj.contains_key("mode") {
        let mut data = obj;
        // Export text may omit alpha; an absent alpha means opaque.
        data.entry("a").or_insert(json!(crate::color::CHANNEL_MAX));
        return Ok(json!({ "type": "color", "data": JsonValue::Object(data) }));
    }
    Ok(JsonValue::Object(obj))
}

/// Normalize then deserialize JSON into the strongly typed [`Value`] enum.
pub fn parse_value(value: JsonValue) -> Result<Value, JsonError> {
    let normalized = normalize_value_json(value)?;
    Ok(serde_json::from_value(normalized)?)
}
