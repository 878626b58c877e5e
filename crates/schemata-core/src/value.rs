//! Dynamic values exchanged with forms and contracts.
//!
//! [`Value`] is the untyped counterpart of [`SchemaType`](crate::SchemaType):
//! its shape is dictated entirely by the schema node it is paired with. It
//! distinguishes `Undefined` from `Null` and carries exact 128-bit integers,
//! neither of which `serde_json::Value` can express.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::numeric::{is_decimal_integer, Integer, MAX_SAFE_INTEGER};

/// A JSON-like value with an explicit `Undefined` and exact integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value at all, e.g. the decoding of a struct without fields.
    Undefined,
    Null,
    Bool(bool),
    /// A native number, as produced for the UI.
    Number(f64),
    /// An exact integer, as exchanged with the contract serializer.
    Integer(Integer),
    String(String),
    Array(Vec<Value>),
    /// Members in insertion order. Equality ignores member order.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Builds an object from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(members: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Member lookup; `None` for non-objects and absent keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members.get(key),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns a human-readable description of the value's shape.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Integer> for Value {
    fn from(int: Integer) -> Self {
        Value::Integer(int)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Integral JSON numbers become [`Value::Integer`], all others
/// [`Value::Number`]. Numbers are read from their source text, so integers
/// up to 128 bits stay exact; wider integers are kept as decimal strings.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => from_json_number(&n.to_string()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn from_json_number(text: &str) -> Value {
    if is_decimal_integer(text, true) {
        return match text.parse::<Integer>() {
            Ok(int) => Value::Integer(int),
            Err(_) => Value::String(text.to_string()),
        };
    }
    text.parse::<f64>().map(Value::Number).unwrap_or(Value::Null)
}

/// JSON rendering:
/// - `Undefined` object members are omitted; elsewhere `Undefined` is `null`.
/// - Integral numbers within the safe range render without a fraction.
/// - Integers outside the 64-bit ranges render as decimal strings.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::Integer(int) => {
                if let Some(v) = int.to_i64() {
                    serializer.serialize_i64(v)
                } else if let Some(v) = int.to_u64() {
                    serializer.serialize_u64(v)
                } else {
                    serializer.serialize_str(&int.to_string())
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(members) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in members {
                    if !value.is_undefined() {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_integers_stay_exact() {
        let value = Value::from(json!([1, -2, 2.5, 18446744073709551615u64]));
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Integer(Integer::from(1u8)),
                Value::Integer(Integer::from(-2i8)),
                Value::Number(2.5),
                Value::Integer(Integer::from(u64::MAX)),
            ])
        );
    }

    #[test]
    fn object_equality_ignores_member_order() {
        let a = Value::object([("x", Value::Number(1.0)), ("y", Value::Number(2.0))]);
        let b = Value::object([("y", Value::Number(2.0)), ("x", Value::Number(1.0))]);
        assert_eq!(a, b);
    }

    #[test]
    fn undefined_members_are_omitted() {
        let value = Value::object([
            ("tag", Value::from("None")),
            ("None", Value::Undefined),
        ]);
        insta::assert_snapshot!(serde_json::to_string(&value).unwrap(), @r#"{"tag":"None"}"#);
    }

    #[test]
    fn numbers_render_compactly() {
        let value = Value::Array(vec![
            Value::Number(3.0),
            Value::Number(0.25),
            Value::Integer(Integer::from(u128::MAX)),
            Value::Integer(Integer::from(-5i64)),
            Value::Undefined,
        ]);
        insta::assert_snapshot!(
            serde_json::to_string(&value).unwrap(),
            @r#"[3,0.25,"340282366920938463463374607431768211455",-5,null]"#
        );
    }

    #[test]
    fn deserializes_from_json_text() {
        let value: Value = serde_json::from_str(r#"{"tag":"Some","Some":[7]}"#).unwrap();
        assert_eq!(value.get("tag").and_then(Value::as_str), Some("Some"));
        assert_eq!(
            value.get("Some").and_then(Value::as_array),
            Some(&[Value::Integer(Integer::from(7u8))][..])
        );
        assert!(value.get("None").is_none());
    }

    #[test]
    fn integers_beyond_64_bits_parse_exactly() {
        let value: Value = serde_json::from_str("18446744073709551617").unwrap();
        assert_eq!(value, Value::Integer(Integer::from(u64::MAX as u128 + 2)));

        let value: Value = serde_json::from_str(
            "[1267650600228229401496703205376, -1267650600228229401496703205376]",
        )
        .unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Integer(Integer::from(1u128 << 100)),
                Value::Integer(Integer::from(-(1i128 << 100))),
            ])
        );
    }

    #[test]
    fn integers_beyond_128_bits_become_decimal_strings() {
        let text = "1606938044258990275541962092341162602522202993782792835301376";
        let value: Value = serde_json::from_str(&format!(r#"{{"big":{}}}"#, text)).unwrap();
        assert_eq!(value.get("big"), Some(&Value::from(text)));
    }

    #[test]
    fn fractional_and_exponent_numbers_stay_native() {
        let value: Value = serde_json::from_str("[0.5, 1e3, -2.5E-1]").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Number(0.5),
                Value::Number(1000.0),
                Value::Number(-0.25),
            ])
        );
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::from(vec![]).type_name(), "array");
        assert_eq!(Value::object(Vec::<(String, Value)>::new()).type_name(), "object");
    }
}
