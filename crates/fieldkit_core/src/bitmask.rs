//! Integer bitmask fields.

use crate::error::{CoreError, CoreResult};
use std::str::FromStr;

/// A bitmask applied to an integer field.
///
/// Built from an integer, or parsed from a binary pattern such as `"0101"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask(i64);

impl Mask {
    /// Creates a mask from raw bits.
    pub const fn bits(bits: i64) -> Self {
        Self(bits)
    }

    /// Parses a binary pattern of `0` and `1` characters.
    ///
    /// Leading zeros are ignored; at most 63 significant bits fit.
    pub fn parse(pattern: &str) -> CoreResult<Self> {
        let binary = !pattern.is_empty() && pattern.bytes().all(|b| b == b'0' || b == b'1');
        let significant = pattern.trim_start_matches('0');
        if !binary || significant.len() >= 64 {
            return Err(CoreError::invalid_mask(pattern));
        }
        if significant.is_empty() {
            return Ok(Self(0));
        }
        i64::from_str_radix(significant, 2)
            .map(Self)
            .map_err(|_| CoreError::invalid_mask(pattern))
    }

    /// The raw bits.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for Mask {
    fn from(bits: i64) -> Self {
        Self(bits)
    }
}

impl FromStr for Mask {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
