//! Placeholder UI values for a schema.
//!
//! A template is what a form starts from before the user fills anything in.
//! It is shaped exactly like a decoded value, so `encode_for_contract` accepts
//! it as-is.

use indexmap::IndexMap;
use schemata_core::{Fields, SchemaType, Value};

use crate::encode::TAG_KEY;

/// Most elements a template fills into `Array` and `ByteArray` nodes, summed
/// over the whole template. Lengths come from the schema and may be as large
/// as `u32::MAX`; past the budget, fixed-length sequences are shortened.
pub const TEMPLATE_ELEMENT_BUDGET: usize = 4096;

/// Builds a placeholder UI value for `schema`.
///
/// Enums select their first declared variant. An enum without variants has no
/// valid value and yields `Null`.
pub fn ui_template(schema: &SchemaType) -> Value {
    Templater {
        budget: TEMPLATE_ELEMENT_BUDGET,
    }
    .template(schema)
}

struct Templater {
    budget: usize,
}

impl Templater {
    /// Claims up to `length` elements from the remaining budget.
    fn claim(&mut self, length: u32) -> usize {
        let count = (length as usize).min(self.budget);
        self.budget -= count;
        count
    }

    fn template(&mut self, schema: &SchemaType) -> Value {
        match schema {
            SchemaType::Struct { fields } => self.fields(fields),
            SchemaType::Enum { .. } | SchemaType::TaggedEnum { .. } => {
                let first = schema.variants().and_then(|variants| variants.first().copied());
                match first {
                    Some(variant) => Value::object([
                        (TAG_KEY, Value::String(variant.name.clone())),
                        (variant.name.as_str(), self.fields(&variant.fields)),
                    ]),
                    None => Value::Null,
                }
            }
            SchemaType::Pair { first, second } => {
                Value::Array(vec![self.template(first), self.template(second)])
            }
            SchemaType::Array { length, item } => {
                let count = self.claim(*length);
                Value::Array((0..count).map(|_| self.template(item)).collect())
            }
            SchemaType::List { .. }
            | SchemaType::Set { .. }
            | SchemaType::Map { .. }
            | SchemaType::ByteList { .. } => Value::Array(Vec::new()),
            SchemaType::ByteArray { length } => {
                let count = self.claim(*length);
                Value::String("00".repeat(count))
            }
            SchemaType::ContractAddress => Value::object([
                ("index", Value::Number(0.0)),
                ("subindex", Value::Number(0.0)),
            ]),
            SchemaType::U8
            | SchemaType::U16
            | SchemaType::U32
            | SchemaType::U64
            | SchemaType::U128
            | SchemaType::I8
            | SchemaType::I16
            | SchemaType::I32
            | SchemaType::I64
            | SchemaType::I128 => Value::Number(0.0),
            SchemaType::ULeb128 { .. } | SchemaType::ILeb128 { .. } | SchemaType::Amount => {
                Value::from("0")
            }
            SchemaType::Bool => Value::Bool(false),
            SchemaType::Unit => Value::Null,
            SchemaType::AccountAddress
            | SchemaType::Timestamp
            | SchemaType::Duration
            | SchemaType::String { .. }
            | SchemaType::ContractName { .. }
            | SchemaType::ReceiveName { .. } => Value::String(String::new()),
        }
    }

    fn fields(&mut self, fields: &Fields) -> Value {
        match fields {
            Fields::None => Value::Undefined,
            Fields::Named(named) => Value::Object(
                named
                    .iter()
                    .map(|field| (field.name.clone(), self.template(&field.field)))
                    .collect::<IndexMap<_, _>>(),
            ),
            Fields::Unnamed(positional) => {
                Value::Array(positional.iter().map(|field| self.template(field)).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_for_contract;
    use schemata_core::{NamedField, SizeLength, Variant};

    fn transfer() -> SchemaType {
        SchemaType::Struct {
            fields: Fields::Named(vec![
                NamedField::new("to", SchemaType::AccountAddress),
                NamedField::new("amount", SchemaType::ULeb128 { max_bytes: 37 }),
                NamedField::new(
                    "memo",
                    SchemaType::Enum {
                        variants: vec![
                            Variant::new("None", Fields::None),
                            Variant::new(
                                "Some",
                                Fields::Unnamed(vec![SchemaType::ByteList {
                                    size_length: SizeLength::U16,
                                }]),
                            ),
                        ],
                    },
                ),
                NamedField::new(
                    "window",
                    SchemaType::Array {
                        length: 2,
                        item: Box::new(SchemaType::Timestamp),
                    },
                ),
            ]),
        }
    }

    #[test]
    fn template_shape() {
        insta::assert_snapshot!(
            serde_json::to_string(&ui_template(&transfer())).unwrap(),
            @r#"{"to":"","amount":"0","memo":{"tag":"None"},"window":["",""]}"#
        );
    }

    #[test]
    fn template_encodes() {
        let schema = transfer();
        let encoded = encode_for_contract(&ui_template(&schema), &schema).unwrap();
        assert_eq!(
            encoded.get("memo"),
            Some(&Value::object([(
                "None",
                Value::object(Vec::<(String, Value)>::new())
            )]))
        );
    }

    #[test]
    fn empty_enum_has_no_template() {
        let schema = SchemaType::TaggedEnum { variants: vec![] };
        assert_eq!(ui_template(&schema), Value::Null);
    }

    #[test]
    fn byte_array_is_zero_filled_hex() {
        assert_eq!(
            ui_template(&SchemaType::ByteArray { length: 3 }),
            Value::from("000000")
        );
    }

    #[test]
    fn huge_fixed_lengths_are_bounded() {
        let schema = SchemaType::Array {
            length: u32::MAX,
            item: Box::new(SchemaType::Array {
                length: u32::MAX,
                item: Box::new(SchemaType::U8),
            }),
        };
        let template = ui_template(&schema);
        let outer = template.as_array().unwrap();
        let inner: usize = outer.iter().map(|item| item.as_array().unwrap().len()).sum();
        assert_eq!(outer.len() + inner, TEMPLATE_ELEMENT_BUDGET);
        assert!(encode_for_contract(&template, &schema).is_ok());

        let bytes = ui_template(&SchemaType::ByteArray { length: u32::MAX });
        assert_eq!(bytes.as_str().map(str::len), Some(2 * TEMPLATE_ELEMENT_BUDGET));
    }
}
