//! Wire value -> UI value.
//!
//! The structural inverse of [`encode`](crate::encode), with three
//! differences in what it produces:
//!
//! - A struct without fields decodes to `Undefined`, not `{}`.
//! - Enum values regain their explicit `tag` member. The wire object carries
//!   no tag, so the first declared variant whose name is a key wins.
//! - Fixed-width integers and contract addresses are widened to native
//!   numbers, while `ULeb128`/`ILeb128` values stay decimal strings.
//!
//! Widening `I64`/`U64`/`I128`/`U128` values beyond 2^53 - 1 is inexact;
//! [`PrecisionPolicy`] decides whether that is allowed, logged, or an error.

use indexmap::IndexMap;
use schemata_core::numeric::{integral_to_decimal, is_decimal_integer, parse_integer};
use schemata_core::{
    Fields, IntWidth, Integer, PathSegment, SchemaType, TranscodeError, Value, Variant,
};

use crate::config::{PrecisionPolicy, TranscodeConfig};
use crate::encode::TAG_KEY;
use crate::walk::Walker;

/// Members of a decoded contract address.
const ADDRESS_KEYS: [&str; 2] = ["index", "subindex"];

/// Width of contract address components.
const ADDRESS_WIDTH: IntWidth = IntWidth {
    bits: 64,
    signed: false,
};

/// Decodes a contract response value using the default configuration.
pub fn decode_from_contract(value: &Value, schema: &SchemaType) -> Result<Value, TranscodeError> {
    decode_with_config(value, schema, &TranscodeConfig::default())
}

/// Decodes a contract response value.
pub fn decode_with_config(
    value: &Value,
    schema: &SchemaType,
    config: &TranscodeConfig,
) -> Result<Value, TranscodeError> {
    tracing::debug!(schema = schema.kind_name(), "decoding value from contract");
    Decoder {
        walk: Walker::new(config),
    }
    .decode(value, schema)
}

struct Decoder<'c> {
    walk: Walker<'c>,
}

impl Decoder<'_> {
    fn decode(&mut self, value: &Value, schema: &SchemaType) -> Result<Value, TranscodeError> {
        match schema {
            SchemaType::Struct { fields } => self.decode_fields(value, fields),

            SchemaType::Enum { variants } => self.decode_enum(value, variants.iter()),
            SchemaType::TaggedEnum { variants } => {
                self.decode_enum(value, variants.iter().map(|(_, variant)| variant))
            }

            SchemaType::ContractAddress => {
                let members = self.walk.expect_object(value)?;
                let mut address = IndexMap::with_capacity(ADDRESS_KEYS.len());
                for key in ADDRESS_KEYS {
                    let member = self.walk.member(members, key)?;
                    self.walk.enter(PathSegment::Key(key.to_string()))?;
                    let widened = self.widen(member, ADDRESS_WIDTH, schema.kind_name())?;
                    self.walk.leave();
                    address.insert(key.to_string(), widened);
                }
                Ok(Value::Object(address))
            }

            SchemaType::U8
            | SchemaType::U16
            | SchemaType::U32
            | SchemaType::U64
            | SchemaType::U128
            | SchemaType::I8
            | SchemaType::I16
            | SchemaType::I32
            | SchemaType::I64
            | SchemaType::I128 => match schema.int_width() {
                Some(width) => self.widen(value, width, schema.kind_name()),
                None => Ok(value.clone()),
            },

            SchemaType::ULeb128 { .. } => self.decode_leb128(value, false),
            SchemaType::ILeb128 { .. } => self.decode_leb128(value, true),

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
                let decoded = items
                    .iter()
                    .enumerate()
                    .map(|(i, element)| self.child(PathSegment::Index(i), element, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(decoded))
            }

            SchemaType::Map { key, value: val, .. } => {
                let entries = self.walk.expect_array(value)?;
                let mut decoded = Vec::with_capacity(entries.len());
                for (i, entry) in entries.iter().enumerate() {
                    self.walk.enter(PathSegment::Index(i))?;
                    let (k, v) = self.walk.expect_entry(entry)?;
                    let k = self.child(PathSegment::Index(0), k, key)?;
                    let v = self.child(PathSegment::Index(1), v, val)?;
                    self.walk.leave();
                    decoded.push(Value::Array(vec![k, v]));
                }
                Ok(Value::Array(decoded))
            }

            SchemaType::Unit
            | SchemaType::Bool
            | SchemaType::Amount
            | SchemaType::AccountAddress
            | SchemaType::Timestamp
            | SchemaType::Duration
            | SchemaType::String { .. }
            | SchemaType::ContractName { .. }
            | SchemaType::ReceiveName { .. }
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
        let decoded = self.decode(value, schema)?;
        self.walk.leave();
        Ok(decoded)
    }

    fn decode_fields(&mut self, value: &Value, fields: &Fields) -> Result<Value, TranscodeError> {
        match fields {
            Fields::None => Ok(Value::Undefined),
            Fields::Named(named) => {
                let members = self.walk.expect_object(value)?;
                let mut decoded = IndexMap::with_capacity(named.len());
                for field in named {
                    let member = self.walk.member(members, &field.name)?;
                    let member =
                        self.child(PathSegment::Key(field.name.clone()), member, &field.field)?;
                    decoded.insert(field.name.clone(), member);
                }
                Ok(Value::Object(decoded))
            }
            Fields::Unnamed(positional) => {
                let items = self.walk.expect_array(value)?;
                let mut decoded = Vec::with_capacity(positional.len());
                for (i, field) in positional.iter().enumerate() {
                    let item = self.walk.element(items, i)?;
                    decoded.push(self.child(PathSegment::Index(i), item, field)?);
                }
                Ok(Value::Array(decoded))
            }
        }
    }

    fn decode_enum<'s>(
        &mut self,
        value: &Value,
        variants: impl IntoIterator<Item = &'s Variant>,
    ) -> Result<Value, TranscodeError> {
        let variants: Vec<&Variant> = variants.into_iter().collect();
        let members = self.walk.expect_object(value)?;

        let matched = variants
            .iter()
            .find_map(|v| members.get(&v.name).map(|payload| (*v, payload)));
        let Some((variant, payload)) = matched else {
            let keys: Vec<&str> = members.keys().map(String::as_str).collect();
            return Err(self.walk.unknown_variant(&keys.join(", "), &variants));
        };

        self.walk.enter(PathSegment::Key(variant.name.clone()))?;
        let payload = self.decode_fields(payload, &variant.fields)?;
        self.walk.leave();

        Ok(Value::object([
            (TAG_KEY, Value::String(variant.name.clone())),
            (variant.name.as_str(), payload),
        ]))
    }

    /// Widens a wire integer to a native number.
    ///
    /// The value must be integral and within `width`, whether it arrives as
    /// an exact integer, a decimal string, or an already native number.
    fn widen(
        &self,
        value: &Value,
        width: IntWidth,
        kind: &str,
    ) -> Result<Value, TranscodeError> {
        let expected = || format!("{} integer", kind);
        let int = match value {
            Value::Number(n) => Integer::from_f64(*n),
            Value::Integer(int) => Some(*int),
            Value::String(text) => parse_integer(text),
            _ => None,
        }
        .ok_or_else(|| self.walk.mismatch(expected(), value))?;

        if !width.contains(&int) {
            return Err(TranscodeError::SchemaMismatch {
                path: self.walk.path.to_string(),
                expected: expected(),
                found: format!("out-of-range integer {}", int),
            });
        }

        let native = int.to_native();
        if !native.exact {
            self.on_precision_loss(int, kind)?;
        }
        Ok(Value::Number(native.value))
    }

    fn on_precision_loss(&self, int: Integer, kind: &str) -> Result<(), TranscodeError> {
        match self.walk.config.precision {
            PrecisionPolicy::Allow => Ok(()),
            PrecisionPolicy::Warn => {
                tracing::warn!(
                    path = %self.walk.path,
                    kind,
                    value = %int,
                    "integer widened to a native number loses precision"
                );
                Ok(())
            }
            PrecisionPolicy::Reject => Err(TranscodeError::PrecisionLoss {
                path: self.walk.path.to_string(),
                value: int.to_string(),
            }),
        }
    }

    /// Arbitrary-precision integers always come out as decimal strings.
    fn decode_leb128(&self, value: &Value, signed: bool) -> Result<Value, TranscodeError> {
        let expected = if signed {
            "signed decimal integer"
        } else {
            "unsigned decimal integer"
        };
        let text = match value {
            Value::String(text) if is_decimal_integer(text, signed) => Some(text.clone()),
            Value::Integer(int) if signed || !int.is_negative() => Some(int.to_string()),
            Value::Number(n) if signed || *n >= 0.0 => integral_to_decimal(*n),
            _ => None,
        };
        text.map(Value::String)
            .ok_or_else(|| self.walk.mismatch(expected, value))
    }
}
