//! Path tracking and shape checks shared by the encoder and decoder.

use indexmap::IndexMap;
use schemata_core::{PathSegment, TranscodeError, Value, ValuePath, Variant};

use crate::config::TranscodeConfig;

/// Tracks where in the value tree a transcoder currently is.
pub(crate) struct Walker<'c> {
    pub(crate) config: &'c TranscodeConfig,
    pub(crate) path: ValuePath,
}

impl<'c> Walker<'c> {
    pub(crate) fn new(config: &'c TranscodeConfig) -> Self {
        Walker {
            config,
            path: ValuePath::new(),
        }
    }

    /// Descends into a child value, enforcing the configured depth bound.
    pub(crate) fn enter(&mut self, segment: PathSegment) -> Result<(), TranscodeError> {
        if let Some(limit) = self.config.max_depth {
            if self.path.depth() >= limit {
                return Err(TranscodeError::DepthLimitExceeded {
                    path: self.path.to_string(),
                    limit,
                });
            }
        }
        self.path.push(segment);
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    pub(crate) fn mismatch(&self, expected: impl Into<String>, found: &Value) -> TranscodeError {
        TranscodeError::SchemaMismatch {
            path: self.path.to_string(),
            expected: expected.into(),
            found: found.type_name().to_string(),
        }
    }

    pub(crate) fn missing(&self, field: impl ToString) -> TranscodeError {
        TranscodeError::MissingField {
            path: self.path.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn unknown_variant(&self, name: &str, variants: &[&Variant]) -> TranscodeError {
        let expected: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
        TranscodeError::UnknownVariant {
            path: self.path.to_string(),
            name: name.to_string(),
            expected: expected.join(", "),
        }
    }

    pub(crate) fn expect_object<'v>(
        &self,
        value: &'v Value,
    ) -> Result<&'v IndexMap<String, Value>, TranscodeError> {
        value.as_object().ok_or_else(|| self.mismatch("object", value))
    }

    pub(crate) fn expect_array<'v>(&self, value: &'v Value) -> Result<&'v [Value], TranscodeError> {
        value.as_array().ok_or_else(|| self.mismatch("array", value))
    }

    /// A `[key, value]` map entry of exactly two elements.
    pub(crate) fn expect_entry<'v>(
        &self,
        value: &'v Value,
    ) -> Result<(&'v Value, &'v Value), TranscodeError> {
        match value.as_array() {
            Some([key, val]) => Ok((key, val)),
            _ => Err(self.mismatch("[key, value] pair", value)),
        }
    }

    /// The `index`-th element, or `MissingField` naming the index.
    pub(crate) fn element<'v>(
        &self,
        items: &'v [Value],
        index: usize,
    ) -> Result<&'v Value, TranscodeError> {
        items.get(index).ok_or_else(|| self.missing(index))
    }

    /// The member `key`, or `MissingField` naming it.
    pub(crate) fn member<'v>(
        &self,
        members: &'v IndexMap<String, Value>,
        key: &str,
    ) -> Result<&'v Value, TranscodeError> {
        members.get(key).ok_or_else(|| self.missing(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemata_core::{ErrorKind, Fields};

    #[test]
    fn depth_limit_applies_below_root() {
        let config = TranscodeConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let mut walker = Walker::new(&config);
        walker.enter(PathSegment::Index(0)).unwrap();

        let err = walker.enter(PathSegment::Key("x".into())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DepthLimit);
        assert_eq!(err.path(), "$[0]");
    }

    #[test]
    fn entry_requires_two_elements() {
        let config = TranscodeConfig::default();
        let walker = Walker::new(&config);
        let mismatch = TranscodeError::SchemaMismatch {
            path: "$".into(),
            expected: "[key, value] pair".into(),
            found: "array".into(),
        };

        let short = Value::Array(vec![Value::Null]);
        assert_eq!(walker.expect_entry(&short).unwrap_err(), mismatch);

        let long = Value::Array(vec![Value::Null, Value::Bool(true), Value::Null]);
        assert_eq!(walker.expect_entry(&long).unwrap_err(), mismatch);

        let pair = Value::Array(vec![Value::Null, Value::Bool(true)]);
        assert_eq!(
            walker.expect_entry(&pair).unwrap(),
            (&Value::Null, &Value::Bool(true))
        );
    }

    #[test]
    fn unknown_variant_lists_declared_names() {
        let config = TranscodeConfig::default();
        let walker = Walker::new(&config);
        let a = Variant::new("A", Fields::None);
        let b = Variant::new("B", Fields::None);
        let err = walker.unknown_variant("C", &[&a, &b]);
        assert_eq!(
            err.to_string(),
            "unknown variant at $: 'C' (expected one of: A, B)"
        );
    }
}
