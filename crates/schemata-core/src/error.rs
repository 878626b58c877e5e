//! Error types for schema-driven transcoding.
//!
//! Uses `thiserror` for structured, matchable error variants. Every variant
//! carries the rendered [`ValuePath`] of the value that caused it, e.g.
//! `$.owner.accounts[2]`.

use std::fmt;

use thiserror::Error;

/// Errors produced while walking a schema and a value in lock-step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// The value's runtime shape does not match what the schema node expects.
    #[error("schema mismatch at {path}: expected {expected}, found {found}")]
    SchemaMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// A declared named field or positional element is absent from the value.
    #[error("missing field at {path}: '{field}'")]
    MissingField { path: String, field: String },

    /// An enum tag (or wire key) does not name any declared variant.
    #[error("unknown variant at {path}: '{name}' (expected one of: {expected})")]
    UnknownVariant {
        path: String,
        name: String,
        expected: String,
    },

    /// A wide integer could not be widened to a native number exactly.
    #[error("precision loss at {path}: {value} is outside the exact range of a native number")]
    PrecisionLoss { path: String, value: String },

    /// The configured recursion bound was reached.
    #[error("recursion depth limit ({limit}) exceeded at {path}")]
    DepthLimitExceeded { path: String, limit: usize },
}

/// Coarse classification of a [`TranscodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaMismatch,
    UnknownVariant,
    PrecisionLoss,
    DepthLimit,
}

impl TranscodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscodeError::SchemaMismatch { .. } | TranscodeError::MissingField { .. } => {
                ErrorKind::SchemaMismatch
            }
            TranscodeError::UnknownVariant { .. } => ErrorKind::UnknownVariant,
            TranscodeError::PrecisionLoss { .. } => ErrorKind::PrecisionLoss,
            TranscodeError::DepthLimitExceeded { .. } => ErrorKind::DepthLimit,
        }
    }

    /// The rendered path of the offending value.
    pub fn path(&self) -> &str {
        match self {
            TranscodeError::SchemaMismatch { path, .. }
            | TranscodeError::MissingField { path, .. }
            | TranscodeError::UnknownVariant { path, .. }
            | TranscodeError::PrecisionLoss { path, .. }
            | TranscodeError::DepthLimitExceeded { path, .. } => path,
        }
    }
}

/// One step from a parent value to a child value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value relative to the root passed to a transcoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_keys_and_indices() {
        let mut path = ValuePath::new();
        assert_eq!(path.to_string(), "$");

        path.push(PathSegment::Key("owner".into()));
        path.push(PathSegment::Index(2));
        path.push(PathSegment::Key("amount".into()));
        assert_eq!(path.to_string(), "$.owner[2].amount");
        assert_eq!(path.depth(), 3);

        assert_eq!(path.pop(), Some(PathSegment::Key("amount".into())));
        assert_eq!(path.to_string(), "$.owner[2]");
    }

    #[test]
    fn missing_field_counts_as_schema_mismatch() {
        let err = TranscodeError::MissingField {
            path: "$.a".into(),
            field: "b".into(),
        };
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
        assert_eq!(err.path(), "$.a");
    }

    #[test]
    fn messages_name_the_location() {
        let err = TranscodeError::UnknownVariant {
            path: "$[0]".into(),
            name: "C".into(),
            expected: "A, B".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown variant at $[0]: 'C' (expected one of: A, B)"
        );
        assert_eq!(err.kind(), ErrorKind::UnknownVariant);
    }
}
