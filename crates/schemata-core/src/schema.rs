//! The contract type schema model.
//!
//! A [`SchemaType`] is one node of the type-description tree that dictates how
//! a value passed to (or returned from) a contract must be shaped. The tree is
//! produced elsewhere (usually by decoding a schema embedded in a contract
//! module) and is only ever read here.
//!
//! The JSON form is internally tagged by `"type"`:
//!
//! ```json
//! { "type": "Pair", "first": { "type": "U8" }, "second": { "type": "Bool" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::numeric::IntWidth;

/// A node of the contract type schema.
///
/// Every transcoder matches on this enum exhaustively, so a new kind is a
/// compile error at each call site until it is handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SchemaType {
    Unit,
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    Amount,
    AccountAddress,
    ContractAddress,
    Timestamp,
    Duration,

    /// Exactly two heterogeneous elements.
    Pair {
        first: Box<SchemaType>,
        second: Box<SchemaType>,
    },

    /// Homogeneous ordered sequence with a length prefix.
    List {
        size_length: SizeLength,
        item: Box<SchemaType>,
    },

    /// Same wire shape as [`SchemaType::List`].
    Set {
        size_length: SizeLength,
        item: Box<SchemaType>,
    },

    /// Ordered list of key/value tuples, not a deduplicating container.
    Map {
        size_length: SizeLength,
        key: Box<SchemaType>,
        value: Box<SchemaType>,
    },

    /// Fixed-length sequence. The length is not enforced by the transcoders.
    Array {
        #[serde(deserialize_with = "json_number::unsigned")]
        length: u32,
        item: Box<SchemaType>,
    },

    Struct { fields: Fields },

    /// Union selected by variant name.
    Enum { variants: Vec<Variant> },

    String { size_length: SizeLength },
    ContractName { size_length: SizeLength },
    ReceiveName { size_length: SizeLength },

    /// Unsigned arbitrary-precision integer, at most `max_bytes` encoded bytes.
    ULeb128 {
        #[serde(deserialize_with = "json_number::unsigned")]
        max_bytes: u32,
    },

    /// Signed arbitrary-precision integer, at most `max_bytes` encoded bytes.
    ILeb128 {
        #[serde(deserialize_with = "json_number::unsigned")]
        max_bytes: u32,
    },

    ByteList { size_length: SizeLength },
    ByteArray {
        #[serde(deserialize_with = "json_number::unsigned")]
        length: u32,
    },

    /// Union whose variants additionally carry a numeric tag.
    TaggedEnum {
        #[serde(deserialize_with = "json_number::tagged_variants")]
        variants: Vec<(u8, Variant)>,
    },
}

/// Width of a serialization-level length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeLength {
    U8,
    U16,
    U32,
    U64,
}

/// The field shape of a struct or enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "fields")]
pub enum Fields {
    None,
    Named(Vec<NamedField>),
    Unnamed(Vec<SchemaType>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
    pub field: SchemaType,
}

/// One named alternative of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub fields: Fields,
}

impl SchemaType {
    /// Returns the variant list of an `Enum` or `TaggedEnum`, in declared
    /// order. Numeric tags are dropped. `None` for every other kind.
    pub fn variants(&self) -> Option<Vec<&Variant>> {
        match self {
            SchemaType::Enum { variants } => Some(variants.iter().collect()),
            SchemaType::TaggedEnum { variants } => {
                Some(variants.iter().map(|(_, variant)| variant).collect())
            }
            _ => None,
        }
    }

    /// Bit width and signedness of the fixed-width integer kinds.
    pub fn int_width(&self) -> Option<IntWidth> {
        let (bits, signed) = match self {
            SchemaType::U8 => (8, false),
            SchemaType::U16 => (16, false),
            SchemaType::U32 => (32, false),
            SchemaType::U64 => (64, false),
            SchemaType::U128 => (128, false),
            SchemaType::I8 => (8, true),
            SchemaType::I16 => (16, true),
            SchemaType::I32 => (32, true),
            SchemaType::I64 => (64, true),
            SchemaType::I128 => (128, true),
            _ => return None,
        };
        Some(IntWidth { bits, signed })
    }

    /// Name of this node's kind, as used in the JSON `"type"` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaType::Unit => "Unit",
            SchemaType::Bool => "Bool",
            SchemaType::U8 => "U8",
            SchemaType::U16 => "U16",
            SchemaType::U32 => "U32",
            SchemaType::U64 => "U64",
            SchemaType::U128 => "U128",
            SchemaType::I8 => "I8",
            SchemaType::I16 => "I16",
            SchemaType::I32 => "I32",
            SchemaType::I64 => "I64",
            SchemaType::I128 => "I128",
            SchemaType::Amount => "Amount",
            SchemaType::AccountAddress => "AccountAddress",
            SchemaType::ContractAddress => "ContractAddress",
            SchemaType::Timestamp => "Timestamp",
            SchemaType::Duration => "Duration",
            SchemaType::Pair { .. } => "Pair",
            SchemaType::List { .. } => "List",
            SchemaType::Set { .. } => "Set",
            SchemaType::Map { .. } => "Map",
            SchemaType::Array { .. } => "Array",
            SchemaType::Struct { .. } => "Struct",
            SchemaType::Enum { .. } => "Enum",
            SchemaType::String { .. } => "String",
            SchemaType::ContractName { .. } => "ContractName",
            SchemaType::ReceiveName { .. } => "ReceiveName",
            SchemaType::ULeb128 { .. } => "ULeb128",
            SchemaType::ILeb128 { .. } => "ILeb128",
            SchemaType::ByteList { .. } => "ByteList",
            SchemaType::ByteArray { .. } => "ByteArray",
            SchemaType::TaggedEnum { .. } => "TaggedEnum",
        }
    }
}

impl Fields {
    pub fn len(&self) -> usize {
        match self {
            Fields::None => 0,
            Fields::Named(fields) => fields.len(),
            Fields::Unnamed(fields) => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NamedField {
    pub fn new(name: impl Into<String>, field: SchemaType) -> Self {
        NamedField {
            name: name.into(),
            field,
        }
    }
}

impl Variant {
    pub fn new(name: impl Into<String>, fields: Fields) -> Self {
        Variant {
            name: name.into(),
            fields,
        }
    }
}

/// Integer attributes of schema nodes.
///
/// With `serde_json/arbitrary_precision`, numbers buffered by an internally
/// tagged enum arrive as a private one-member map rather than as integers.
/// Reading them through `serde_json::Value` accepts both forms.
mod json_number {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer};

    use super::Variant;

    fn convert<T: TryFrom<u64>, E: Error>(json: &serde_json::Value) -> Result<T, E> {
        json.as_u64()
            .and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| {
                E::invalid_value(
                    Unexpected::Other(&json.to_string()),
                    &"an unsigned integer in range",
                )
            })
    }

    pub(super) fn unsigned<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let json = serde_json::Value::deserialize(deserializer)?;
        convert(&json)
    }

    pub(super) fn tagged_variants<'de, D>(deserializer: D) -> Result<Vec<(u8, Variant)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<(serde_json::Value, Variant)>::deserialize(deserializer)?
            .into_iter()
            .map(|(tag, variant)| convert(&tag).map(|tag| (tag, variant)))
            .collect()
    }
}
