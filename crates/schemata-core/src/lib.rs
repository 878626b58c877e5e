pub mod error;
pub mod numeric;
pub mod schema;
pub mod value;

// Re-export commonly used types
pub use error::{ErrorKind, PathSegment, TranscodeError, ValuePath};
pub use numeric::{IntWidth, Integer, Native, MAX_SAFE_INTEGER};
pub use schema::{Fields, NamedField, SchemaType, SizeLength, Variant};
pub use value::Value;
