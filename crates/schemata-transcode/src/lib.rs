//! Schema-driven transcoding between UI values and contract values.
//!
//! Two pure structural recursions walk a [`SchemaType`] and a [`Value`] in
//! lock-step:
//!
//! - [`encode_for_contract`]: UI value -> value ready for the contract
//!   parameter serializer.
//! - [`decode_from_contract`]: deserialized contract value -> UI value.
//!
//! The directions differ in how enums are represented (the UI side carries an
//! explicit `tag` member) and in how integers are represented (the UI side
//! uses native numbers for fixed-width integers and decimal strings for
//! `ULeb128`/`ILeb128`).
//!
//! # Usage
//!
//! ```ignore
//! let wire = encode_for_contract(&form_value, &schema)?;
//! // ... serialize `wire`, invoke the contract, deserialize the response ...
//! let shown = decode_from_contract(&response, &return_schema)?;
//! ```
//!
//! [`SchemaType`]: schemata_core::SchemaType
//! [`Value`]: schemata_core::Value

pub mod config;
pub mod decode;
pub mod encode;
pub mod template;
mod walk;

pub use config::{PrecisionPolicy, TranscodeConfig};
pub use decode::{decode_from_contract, decode_with_config};
pub use encode::{encode_for_contract, encode_with_config, TAG_KEY};
pub use template::ui_template;
