use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field map of a Firestore document, keyed by field name.
pub type Fields = BTreeMap<String, Value>;

/// One Firestore typed value. The REST API represents values as a union
/// object with a single type-tag key, e.g. `{"stringValue": "Oak Park"}`,
/// which is exactly what an externally tagged enum serializes to.
///
/// Only the types the seeder writes are covered; `integerValue` is carried
/// as a JSON string on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Value {
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "integerValue", with = "integer_string")]
    Integer(i64),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    #[serde(rename = "timestampValue")]
    Timestamp(DateTime<Utc>),
    #[serde(rename = "mapValue")]
    Map(MapValue),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MapValue {
    #[serde(default)]
    pub fields: Fields,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Document {
    /// Full resource name, assigned by the store. Absent on creation bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn map(fields: Fields) -> Self {
        Value::Map(MapValue { fields })
    }
}

mod integer_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn values_serialize_as_single_key_unions() {
        let value = serde_json::to_value(Value::string("Oak Park")).unwrap();
        assert_eq!(value, json!({"stringValue": "Oak Park"}));

        let value = serde_json::to_value(Value::Double(5000.0)).unwrap();
        assert_eq!(value, json!({"doubleValue": 5000.0}));

        let value = serde_json::to_value(Value::Boolean(true)).unwrap();
        assert_eq!(value, json!({"booleanValue": true}));
    }

    #[test]
    fn integers_travel_as_strings() {
        let value = serde_json::to_value(Value::Integer(42)).unwrap();
        assert_eq!(value, json!({"integerValue": "42"}));

        let back: Value = serde_json::from_value(json!({"integerValue": "-7"})).unwrap();
        assert_eq!(back, Value::Integer(-7));
    }

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 15, 19, 0, 0).unwrap();
        let value = serde_json::to_value(Value::Timestamp(instant)).unwrap();
        let raw = value["timestampValue"].as_str().unwrap();
        assert!(raw.starts_with("2025-06-15T19:00:00"));
    }

    #[test]
    fn nested_maps_carry_a_fields_wrapper() {
        let mut inner = Fields::new();
        inner.insert("city".into(), Value::string("Ennis"));
        let value = serde_json::to_value(Value::map(inner)).unwrap();
        assert_eq!(
            value,
            json!({"mapValue": {"fields": {"city": {"stringValue": "Ennis"}}}})
        );
    }

    #[test]
    fn creation_bodies_omit_the_document_name() {
        let doc = Document {
            name: None,
            fields: Fields::new(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("name").is_none());
    }
}
