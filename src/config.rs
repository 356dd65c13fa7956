//! Code-point range configuration for the variant table scan.

use std::fmt;
use std::str::FromStr;

/// Highest Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Folded forms longer than this are left out of the table.
pub const MAX_FOLDED_LEN: usize = 3;

/// Longest piece the partitioner hands to the assembler.
pub const MAX_PIECE_LEN: usize = MAX_FOLDED_LEN;

/// Most alternative piece sequences the compiler tracks within one chunk.
/// Overlapping keys past this point cut the chunk short.
pub const MAX_LIVE_SEQUENCES: usize = 16;

/// The Basic Multilingual Plane.
pub const DEFAULT_CODE_POINTS: &[CodePointRange] = &[CodePointRange::new(0, 0xFFFF)];

/// An inclusive range of code points to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodePointRange {
    pub low: u32,
    pub high: u32,
}

/// Errors raised while validating or parsing code-point ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvertedRange { low: u32, high: u32 },
    OutOfRange { high: u32 },
    Malformed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedRange { low, high } => {
                write!(f, "Invalid code point range: U+{low:04X} is above U+{high:04X}")
            }
            Self::OutOfRange { high } => write!(
                f,
                "Invalid code point range: U+{high:04X} is beyond U+{MAX_CODE_POINT:04X}"
            ),
            Self::Malformed(text) => write!(f, "Malformed code point range: {text:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl CodePointRange {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low > self.high {
            return Err(ConfigError::InvertedRange {
                low: self.low,
                high: self.high,
            });
        }
        if self.high > MAX_CODE_POINT {
            return Err(ConfigError::OutOfRange { high: self.high });
        }
        Ok(())
    }

    /// Scalar values in the range; surrogates are skipped.
    pub fn chars(&self) -> impl Iterator<Item = char> + use<> {
        (self.low..=self.high).filter_map(char::from_u32)
    }
}

/// Check every range before anything is scanned.
pub fn validate_ranges(ranges: &[CodePointRange]) -> Result<(), ConfigError> {
    ranges.iter().try_for_each(CodePointRange::validate)
}

fn parse_code_point(text: &str) -> Option<u32> {
    let text = text.trim();
    let hex = text
        .strip_prefix("U+")
        .or_else(|| text.strip_prefix("u+"))
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"));
    match hex {
        Some(digits) => u32::from_str_radix(digits, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Parses `LOW-HIGH` or a single code point. Bounds are decimal, or hex with
/// a `U+` or `0x` prefix.
impl FromStr for CodePointRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::Malformed(s.to_string());
        let range = match s.split_once('-') {
            Some((low, high)) => Self::new(
                parse_code_point(low).ok_or_else(malformed)?,
                parse_code_point(high).ok_or_else(malformed)?,
            ),
            None => {
                let point = parse_code_point(s).ok_or_else(malformed)?;
                Self::new(point, point)
            }
        };
        range.validate()?;
        Ok(range)
    }
}
