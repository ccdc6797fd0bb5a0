//! Firestore typed values.
//!
//! Documents travel as `{"fields": {"name": {"stringValue": "..."}}}`. Plain
//! JSON maps onto these one to one, except that strings holding an RFC 3339
//! timestamp are sent as `timestampValue` so the server orders them by time.

use jiff::Timestamp;
use serde_json::{Map, Number, Value, json};
use skillorbit::backend::Document;

use super::FirebaseError;

/// Encode a document's fields.
pub fn encode_fields(document: &Document) -> Map<String, Value> {
    document
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => json!({ "integerValue": integer.to_string() }),
            None => json!({ "doubleValue": number }),
        },
        Value::String(text) if text.parse::<Timestamp>().is_ok() => {
            json!({ "timestampValue": text })
        }
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(values) => json!({
            "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Decode a document's fields.
///
/// # Errors
///
/// Returns an error when a field is not a recognised typed value.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Document, FirebaseError> {
    fields
        .iter()
        .map(|(name, value)| Ok((name.clone(), decode_value(value)?)))
        .collect()
}

/// Decode one typed value.
///
/// # Errors
///
/// Returns an error when the value is not a recognised typed value.
pub fn decode_value(value: &Value) -> Result<Value, FirebaseError> {
    let Some((kind, inner)) = value.as_object().and_then(|typed| typed.iter().next()) else {
        return Err(unexpected(value));
    };

    match (kind.as_str(), inner) {
        ("nullValue", _) => Ok(Value::Null),
        ("booleanValue", Value::Bool(flag)) => Ok(Value::Bool(*flag)),
        ("integerValue", Value::String(text)) => text
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_parse| unexpected(value)),
        ("integerValue", Value::Number(number)) => Ok(Value::Number(number.clone())),
        ("doubleValue", Value::Number(number)) => Ok(Value::Number(number.clone())),
        ("doubleValue", Value::String(text)) => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| unexpected(value)),
        (
            "stringValue" | "timestampValue" | "referenceValue" | "bytesValue",
            Value::String(text),
        ) => Ok(Value::String(text.clone())),
        ("geoPointValue", point @ Value::Object(_)) => Ok(point.clone()),
        ("arrayValue", Value::Object(array)) => match array.get("values") {
            Some(Value::Array(values)) => values
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            None => Ok(Value::Array(Vec::new())),
            Some(_) => Err(unexpected(value)),
        },
        ("mapValue", Value::Object(map)) => match map.get("fields") {
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            None => Ok(Value::Object(Map::new())),
            Some(_) => Err(unexpected(value)),
        },
        _ => Err(unexpected(value)),
    }
}

fn unexpected(value: &Value) -> FirebaseError {
    FirebaseError::UnexpectedResponse(format!("unsupported Firestore value: {value}"))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(document) => document,
            _ => Document::new(),
        }
    }

    #[test]
    fn encodes_course_document() {
        let encoded = encode_fields(&document(json!({
            "title": "Python Programming for Beginners",
            "price": 1499,
            "rating": "4.9",
            "createdAt": "2024-01-15T10:00:00Z",
            "enrolledCourses": ["3"],
            "badge": null,
        })));

        assert_eq!(
            Value::Object(encoded),
            json!({
                "title": { "stringValue": "Python Programming for Beginners" },
                "price": { "integerValue": "1499" },
                "rating": { "stringValue": "4.9" },
                "createdAt": { "timestampValue": "2024-01-15T10:00:00Z" },
                "enrolledCourses": { "arrayValue": { "values": [{ "stringValue": "3" }] } },
                "badge": { "nullValue": null },
            })
        );
    }

    #[test]
    fn decodes_server_document() -> TestResult {
        let fields = document(json!({
            "role": { "stringValue": "admin" },
            "isActive": { "booleanValue": true },
            "studentCount": { "integerValue": "5420" },
            "rating": { "doubleValue": 4.8 },
            "createdAt": { "timestampValue": "2024-01-15T10:00:00.123456Z" },
            "enrolledCourses": { "arrayValue": {} },
            "meta": { "mapValue": { "fields": { "n": { "integerValue": "1" } } } },
        }));

        assert_eq!(
            Value::Object(decode_fields(&fields)?),
            json!({
                "role": "admin",
                "isActive": true,
                "studentCount": 5420,
                "rating": 4.8,
                "createdAt": "2024-01-15T10:00:00.123456Z",
                "enrolledCourses": [],
                "meta": { "n": 1 },
            })
        );

        Ok(())
    }

    #[test]
    fn rejects_unknown_value_kind() {
        assert!(decode_value(&json!({ "mysteryValue": 1 })).is_err());
        assert!(decode_value(&json!("bare")).is_err());
    }
}
