//! Transcoder configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the decoder does when a 64- or 128-bit integer is widened to a native
/// number outside its exact range (beyond 2^53 - 1 in magnitude).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionPolicy {
    /// Widen silently.
    Allow,
    /// Widen and emit a `tracing` warning with the exact value.
    #[default]
    Warn,
    /// Fail with `TranscodeError::PrecisionLoss`.
    Reject,
}

impl FromStr for PrecisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" | "Allow" => Ok(PrecisionPolicy::Allow),
            "warn" | "Warn" => Ok(PrecisionPolicy::Warn),
            "reject" | "Reject" => Ok(PrecisionPolicy::Reject),
            _ => Err(format!(
                "invalid precision policy '{}', expected allow/warn/reject",
                s
            )),
        }
    }
}

impl fmt::Display for PrecisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrecisionPolicy::Allow => "allow",
            PrecisionPolicy::Warn => "warn",
            PrecisionPolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

/// Configuration shared by the encoder and decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeConfig {
    /// Handling of inexact integer widening. Default: warn.
    pub precision: PrecisionPolicy,
    /// Maximum nesting depth below the root value. Default: unbounded.
    pub max_depth: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_warn_without_depth_limit() {
        let config = TranscodeConfig::default();
        assert_eq!(config.precision, PrecisionPolicy::Warn);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("reject".parse::<PrecisionPolicy>(), Ok(PrecisionPolicy::Reject));
        assert_eq!("Allow".parse::<PrecisionPolicy>(), Ok(PrecisionPolicy::Allow));
        assert!("strict".parse::<PrecisionPolicy>().is_err());
        assert_eq!(PrecisionPolicy::Warn.to_string(), "warn");
    }

    #[test]
    fn config_from_json() {
        let config: TranscodeConfig =
            serde_json::from_str(r#"{ "precision": "reject", "max_depth": 16 }"#).unwrap();
        assert_eq!(
            config,
            TranscodeConfig {
                precision: PrecisionPolicy::Reject,
                max_depth: Some(16),
            }
        );
    }
}
