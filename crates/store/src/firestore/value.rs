//! Firestore value-format encode/decode.
//!
//! The REST API wraps every field in a typed envelope
//! (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). These
//! helpers translate between that format and plain JSON. Integers
//! arrive as strings on the wire.

use serde_json::{Map, Value, json};

/// Decode one Firestore-typed value into plain JSON.
pub fn decode(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };

    if let Some(s) = obj.get("stringValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(raw) = obj.get("integerValue") {
        let parsed = match raw {
            Value::String(s) => s.parse::<i64>().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        };
        return parsed.map(|n| json!(n)).unwrap_or(Value::Null);
    }
    if let Some(n) = obj.get("doubleValue").and_then(Value::as_f64) {
        return json!(n);
    }
    if let Some(b) = obj.get("booleanValue").and_then(Value::as_bool) {
        return Value::Bool(b);
    }
    if let Some(ts) = obj.get("timestampValue").and_then(Value::as_str) {
        return Value::String(ts.to_string());
    }
    if let Some(reference) = obj.get("referenceValue").and_then(Value::as_str) {
        return Value::String(reference.to_string());
    }
    if obj.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(array) = obj.get("arrayValue") {
        let values = array.get("values").and_then(Value::as_array);
        return Value::Array(values.map(|vs| vs.iter().map(decode).collect()).unwrap_or_default());
    }
    if let Some(map) = obj.get("mapValue") {
        let decoded = map
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_default();
        return Value::Object(decoded);
    }

    Value::Null
}

/// Decode a document's `fields` object into a plain JSON object.
pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields.iter().map(|(k, v)| (k.clone(), decode(v))).collect()
}

/// Encode plain JSON into a Firestore-typed value.
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({"nullValue": null}),
        Value::Bool(b) => json!({"booleanValue": b}),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({"integerValue": i.to_string()})
            } else {
                json!({"doubleValue": n.as_f64()})
            }
        }
        Value::String(s) => {
            // timestamp fields must go out as timestampValue or range
            // filters against them never match
            if chrono::DateTime::parse_from_rfc3339(s).is_ok() {
                json!({"timestampValue": s})
            } else {
                json!({"stringValue": s})
            }
        }
        Value::Array(values) => {
            json!({"arrayValue": {"values": values.iter().map(encode).collect::<Vec<_>>()}})
        }
        Value::Object(fields) => json!({"mapValue": {"fields": encode_fields(fields)}}),
    }
}

/// Encode a plain JSON object into a Firestore `fields` object.
pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields.iter().map(|(k, v)| (k.clone(), encode(v))).collect()
}
