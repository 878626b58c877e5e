//! Integer widths and the boundary between exact and native numbers.
//!
//! Two numeric paths exist and are never unified:
//!
//! - Fixed-width integers (`U8`..`U128`, `I8`..`I128`) travel as exact
//!   [`Integer`]s on the wire and are widened to `f64` for the UI. Widening is
//!   exact only up to [`MAX_SAFE_INTEGER`].
//! - Arbitrary-precision integers (`ULeb128`, `ILeb128`) stay decimal strings
//!   end to end.

use std::fmt;
use std::str::FromStr;

/// Largest integer `n` such that every integer in `-n..=n` is exactly
/// representable as an `f64` (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Bit width and signedness of a fixed-width integer schema kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntWidth {
    pub bits: u8,
    pub signed: bool,
}

impl IntWidth {
    /// Whether values of this width can fall outside the exact range of an
    /// `f64`.
    pub fn exceeds_native_precision(&self) -> bool {
        self.bits >= 64
    }

    /// Whether `int` lies within `0..2^bits` (unsigned) or
    /// `-2^(bits-1)..2^(bits-1)` (signed).
    pub fn contains(&self, int: &Integer) -> bool {
        let magnitude = int.unsigned_abs();
        match (self.signed, int.is_negative()) {
            (false, true) => false,
            (false, false) => self.bits >= 128 || magnitude < 1u128 << self.bits,
            (true, true) => magnitude <= 1u128 << (self.bits - 1),
            (true, false) => magnitude < 1u128 << (self.bits - 1),
        }
    }
}

/// An exact integer covering the whole `i128` and `u128` ranges.
///
/// Non-negative values are always stored unsigned, so `Integer::from(5i8)`
/// and `Integer::from(5u64)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer(Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    /// Strictly negative.
    Negative(i128),
    NonNegative(u128),
}

/// Result of widening an [`Integer`] to a native number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Native {
    pub value: f64,
    /// `false` when the magnitude exceeds [`MAX_SAFE_INTEGER`].
    pub exact: bool,
}

impl Integer {
    pub fn is_negative(&self) -> bool {
        matches!(self.0, Repr::Negative(_))
    }

    pub fn to_i128(&self) -> Option<i128> {
        match self.0 {
            Repr::Negative(v) => Some(v),
            Repr::NonNegative(v) => i128::try_from(v).ok(),
        }
    }

    pub fn to_u128(&self) -> Option<u128> {
        match self.0 {
            Repr::Negative(_) => None,
            Repr::NonNegative(v) => Some(v),
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|v| i64::try_from(v).ok())
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }

    /// Absolute value; `i128::MIN` is representable since the result is
    /// unsigned.
    pub fn unsigned_abs(&self) -> u128 {
        match self.0 {
            Repr::Negative(v) => v.unsigned_abs(),
            Repr::NonNegative(v) => v,
        }
    }

    /// Widens to `f64`, reporting whether the conversion was exact.
    pub fn to_native(&self) -> Native {
        let value = match self.0 {
            Repr::Negative(v) => v as f64,
            Repr::NonNegative(v) => v as f64,
        };
        Native {
            value,
            exact: self.unsigned_abs() <= MAX_SAFE_INTEGER as u128,
        }
    }

    /// Converts an integral `f64` within the 128-bit ranges.
    pub fn from_f64(value: f64) -> Option<Integer> {
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        if value < 0.0 {
            if value < i128::MIN as f64 {
                return None;
            }
            Some(Integer::from(value as i128))
        } else {
            if value >= u128::MAX as f64 {
                return None;
            }
            Some(Integer::from(value as u128))
        }
    }
}

macro_rules! integer_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Integer {
            fn from(v: $t) -> Self {
                if v < 0 {
                    Integer(Repr::Negative(v as i128))
                } else {
                    Integer(Repr::NonNegative(v as u128))
                }
            }
        })*
    };
}

macro_rules! integer_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Integer {
            fn from(v: $t) -> Self {
                Integer(Repr::NonNegative(v as u128))
            }
        })*
    };
}

integer_from_signed!(i8, i16, i32, i64, i128);
integer_from_unsigned!(u8, u16, u32, u64, u128);

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Negative(v) => write!(f, "{}", v),
            Repr::NonNegative(v) => write!(f, "{}", v),
        }
    }
}

/// Error returned when a string is not a decimal integer within 128 bits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid 128-bit decimal integer: '{0}'")]
pub struct ParseIntegerError(pub String);

impl FromStr for Integer {
    type Err = ParseIntegerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIntegerError(s.to_string());
        if !is_decimal_integer(s, true) {
            return Err(err());
        }
        if s.starts_with('-') {
            s.parse::<i128>().map(Integer::from).map_err(|_| err())
        } else {
            s.parse::<u128>().map(Integer::from).map_err(|_| err())
        }
    }
}

/// Parses a decimal string that fits in 128 bits.
pub fn parse_integer(text: &str) -> Option<Integer> {
    text.parse().ok()
}

/// Returns `true` if `text` is a decimal integer of any length: ASCII digits,
/// optionally preceded by `-` when `signed`.
pub fn is_decimal_integer(text: &str, signed: bool) -> bool {
    let digits = match text.strip_prefix('-') {
        Some(rest) if signed => rest,
        Some(_) => return false,
        None => text,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Renders an integral `f64` as a decimal string without a fraction or
/// exponent.
pub fn integral_to_decimal(value: f64) -> Option<String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value == 0.0 {
        return Some("0".to_string());
    }
    Some(format!("{:.0}", value))
}
