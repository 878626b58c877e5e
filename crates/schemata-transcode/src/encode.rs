//! UI value -> wire value.
//!
//! The encoder turns form-shaped values into the exact shape the contract
//! parameter serializer expects. The only real reshaping is on enums, where
//! the UI's explicit `tag` member is dropped:
//!
//! ```text
//! { "tag": "Transfer", "Transfer": [..] }   ->   { "Transfer": [..] }
//! ```
//!
//! Primitive kinds pass through untouched; range checks belong to the
//! serializer.

use indexmap::IndexMap;
use schemata_core::{Fields, PathSegment, SchemaType, TranscodeError, Value, Variant};

use crate::config::TranscodeConfig;
use crate::walk::Walker;

/// Member of a UI enum value naming the selected variant.
pub const TAG_KEY: &str = "tag";

/// Encodes `value` for a contract call using the default configuration.
pub fn encode_for_contract(value: &Value, schema: &SchemaType) -> Result<Value, TranscodeError> {
    encode_with_config(value, schema, &TranscodeConfig::default())
}

/// Encodes `value` for a contract call.
pub fn encode_with_config(
    value: &Value,
    schema: &SchemaType,
    config: &TranscodeConfig,
) -> Result<Value, TranscodeError> {
    tracing::debug!(schema = schema.kind_name(), "encoding value for contract");
    Encoder {
        walk: Walker::new(config),
    }
    .encode(value, schema)
}

struct Encoder<'c> {
    walk: Walker<'c>,
}

impl Encoder<'_> {
    fn encode(&mut self, value: &Value, schema: &SchemaType) -> Result<Value, TranscodeError> {
        match schema {
            SchemaType::Struct { fields } => self.encode_fields(value, fields),

            SchemaType::Enum { variants } => self.encode_enum(value, variants.iter()),
            SchemaType::TaggedEnum { variants } => {
                self.encode_enum(value, variants.iter().map(|(_, variant)| variant))
            }

            SchemaType::Pair { first, second } => {
                let items = self.walk.expect_array(value)?;
                let (a, b) = (self.walk.element(items, 0)?, self.walk.element(items, 1)?);
                let first = self.child(PathSegment::Index(0), a, first)?;
                let second = self.child(PathSegment::Index(1), b, second)?;
                Ok(Value::Array(vec![first, second]))
            }

            SchemaType::List { item, .. }
            | SchemaType::Set { item, .. }
            | SchemaType::Array { item, .. } => {
                let items = self.walk.expect_array(value)?;
                let encoded = items
                    .iter()
                    .enumerate()
                    .map(|(i, element)| self.child(PathSegment::Index(i), element, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(encoded))
            }

            SchemaType::Map { key, value: val, .. } => {
                let entries = self.walk.expect_array(value)?;
                let mut encoded = Vec::with_capacity(entries.len());
                for (i, entry) in entries.iter().enumerate() {
                    self.walk.enter(PathSegment::Index(i))?;
                    let (k, v) = self.walk.expect_entry(entry)?;
                    let k = self.child(PathSegment::Index(0), k, key)?;
                    let v = self.child(PathSegment::Index(1), v, val)?;
                    self.walk.leave();
                    encoded.push(Value::Array(vec![k, v]));
                }
                Ok(Value::Array(encoded))
            }

            SchemaType::Unit
            | SchemaType::Bool
            | SchemaType::U8
            | SchemaType::U16
            | SchemaType::U32
            | SchemaType::U64
            | SchemaType::U128
            | SchemaType::I8
            | SchemaType::I16
            | SchemaType::I32
            | SchemaType::I64
            | SchemaType::I128
            | SchemaType::Amount
            | SchemaType::AccountAddress
            | SchemaType::ContractAddress
            | SchemaType::Timestamp
            | SchemaType::Duration
            | SchemaType::String { .. }
            | SchemaType::ContractName { .. }
            | SchemaType::ReceiveName { .. }
            | SchemaType::ULeb128 { .. }
            | SchemaType::ILeb128 { .. }
            | SchemaType::ByteList { .. }
            | SchemaType::ByteArray { .. } => Ok(value.clone()),
        }
    }

    fn child(
        &mut self,
        segment: PathSegment,
        value: &Value,
        schema: &SchemaType,
    ) -> Result<Value, TranscodeError> {
        self.walk.enter(segment)?;
        let encoded = self.encode(value, schema)?;
        self.walk.leave();
        Ok(encoded)
    }

    /// Struct semantics, also used for enum payloads.
    fn encode_fields(&mut self, value: &Value, fields: &Fields) -> Result<Value, TranscodeError> {
        match fields {
            Fields::None => Ok(Value::Object(IndexMap::new())),
            Fields::Named(named) => {
                let members = self.walk.expect_object(value)?;
                let mut encoded = IndexMap::with_capacity(named.len());
                for field in named {
                    let member = self.walk.member(members, &field.name)?;
                    let member =
                        self.child(PathSegment::Key(field.name.clone()), member, &field.field)?;
                    encoded.insert(field.name.clone(), member);
                }
                Ok(Value::Object(encoded))
            }
            Fields::Unnamed(positional) => {
                let items = self.walk.expect_array(value)?;
                let mut encoded = Vec::with_capacity(positional.len());
                for (i, field) in positional.iter().enumerate() {
                    let item = self.walk.element(items, i)?;
                    encoded.push(self.child(PathSegment::Index(i), item, field)?);
                }
                Ok(Value::Array(encoded))
            }
        }
    }

    fn encode_enum<'s>(
        &mut self,
        value: &Value,
        variants: impl IntoIterator<Item = &'s Variant>,
    ) -> Result<Value, TranscodeError> {
        let variants: Vec<&Variant> = variants.into_iter().collect();
        let members = self.walk.expect_object(value)?;

        let tag = self.walk.member(members, TAG_KEY)?;
        let Some(tag) = tag.as_str() else {
            self.walk.enter(PathSegment::Key(TAG_KEY.to_string()))?;
            return Err(self.walk.mismatch("string", tag));
        };
        let Some(variant) = variants.iter().find(|v| v.name == tag) else {
            return Err(self.walk.unknown_variant(tag, &variants));
        };

        let payload = members.get(tag).unwrap_or(&Value::Undefined);
        self.walk.enter(PathSegment::Key(tag.to_string()))?;
        let payload = self.encode_fields(payload, &variant.fields)?;
        self.walk.leave();

        Ok(Value::object([(tag, payload)]))
    }
}
