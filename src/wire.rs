//! Wire encodings used by the API.
//!
//! The service writes flags as `0`/`1` integers but is inconsistent on the way
//! back (booleans, integers and numeric strings all occur). Timestamps are
//! unix seconds, sometimes sent as strings and sometimes as `""` when unset.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::Serializer;
use serde_json::Value;
use std::collections::HashMap;

fn flag_from_value<E: de::Error>(value: &Value) -> Result<Option<bool>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::Number(n) => Ok(Some(n.as_f64().unwrap_or(0.0) != 0.0)),
        Value::String(s) => match s.trim() {
            "" => Ok(None),
            "0" | "false" => Ok(Some(false)),
            "1" | "true" => Ok(Some(true)),
            other => Err(E::custom(format!("invalid flag value: {other}"))),
        },
        other => Err(E::custom(format!("invalid flag value: {other}"))),
    }
}

fn int_from_value<E: de::Error>(value: &Value) -> Result<Option<i64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| E::custom(format!("invalid integer: {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| E::custom(format!("invalid integer: {s}"))),
        Value::Bool(b) => Ok(Some(i64::from(*b))),
        other => Err(E::custom(format!("invalid integer: {other}"))),
    }
}

/// Required flag, written as `0`/`1`. Missing or `null` decodes to `false`.
pub(crate) mod int_bool {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(flag_from_value::<D::Error>(&value)?.unwrap_or(false))
    }
}

/// Optional flag, written as `0`/`1` when set.
pub(crate) mod opt_int_bool {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(b) => serializer.serialize_u8(u8::from(*b)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        flag_from_value::<D::Error>(&value)
    }
}

/// Optional integer that may arrive as a number or a numeric string.
pub(crate) mod opt_lenient_int {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_i64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        int_from_value::<D::Error>(&value)
    }
}

/// Checkbox state, written as the strings `"0"`/`"1"`.
pub(crate) mod flag_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(flag_from_value::<D::Error>(&value)?.unwrap_or(false))
    }
}

/// Optional value that the API sometimes sends as a number, sometimes as a
/// string. Always kept as a string.
pub(crate) mod opt_string_or_number {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(de::Error::custom(format!("expected string or number: {other}"))),
        }
    }
}

/// Optional unix timestamp in seconds.
pub(crate) mod opt_unix_timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_i64(ts.timestamp()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match int_from_value::<D::Error>(&value)? {
            Some(secs) => Utc
                .timestamp_opt(secs, 0)
                .single()
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {secs}"))),
            None => Ok(None),
        }
    }
}

/// String map that the API sends as `[]` when empty.
pub(crate) mod lenient_map {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<String, String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(HashMap::new()),
            Value::Array(items) if items.is_empty() => Ok(HashMap::new()),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, value)| match value {
                    Value::String(s) => Ok((key, s)),
                    Value::Null => Ok((key, String::new())),
                    other => Ok((key, other.to_string())),
                })
                .collect(),
            other => Err(de::Error::custom(format!("expected a map: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Flags {
        #[serde(with = "super::int_bool", default)]
        required: bool,
        #[serde(
            with = "super::opt_int_bool",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        optional: Option<bool>,
    }

    #[test]
    fn test_flags_encode_as_integers() {
        let json = serde_json::to_value(Flags {
            required: true,
            optional: Some(false),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "required": 1, "optional": 0 }));

        let json = serde_json::to_value(Flags {
            required: false,
            optional: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "required": 0 }));
    }

    #[test]
    fn test_flags_decode_leniently() {
        let flags: Flags =
            serde_json::from_str(r#"{ "required": true, "optional": "1" }"#).unwrap();
        assert!(flags.required);
        assert_eq!(flags.optional, Some(true));

        let flags: Flags = serde_json::from_str(r#"{ "required": "0" }"#).unwrap();
        assert!(!flags.required);
        assert_eq!(flags.optional, None);

        assert!(serde_json::from_str::<Flags>(r#"{ "required": "maybe" }"#).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(with = "super::opt_unix_timestamp", default)]
        at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[test]
    fn test_timestamps() {
        let s: Stamped = serde_json::from_str(r#"{ "at": 1337133713 }"#).unwrap();
        assert_eq!(s.at.unwrap().timestamp(), 1337133713);

        let s: Stamped = serde_json::from_str(r#"{ "at": "1337133713" }"#).unwrap();
        assert_eq!(s.at.unwrap().timestamp(), 1337133713);

        let s: Stamped = serde_json::from_str(r#"{ "at": "" }"#).unwrap();
        assert!(s.at.is_none());
    }

    #[derive(Debug, Deserialize)]
    struct Meta {
        #[serde(deserialize_with = "super::lenient_map::deserialize", default)]
        meta: std::collections::HashMap<String, String>,
    }

    #[test]
    fn test_meta_accepts_empty_array() {
        let m: Meta = serde_json::from_str(r#"{ "meta": [] }"#).unwrap();
        assert!(m.meta.is_empty());

        let m: Meta = serde_json::from_str(r#"{ "meta": { "a": "b" } }"#).unwrap();
        assert_eq!(m.meta["a"], "b");
    }
}
