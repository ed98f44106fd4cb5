/*!
 * Format Types
 * Errors, options and parsed directives for printf
 */

use crate::core::data_structures::InlineString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// printf error types
///
/// Positions are byte offsets of the offending `%` in the format string.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatError {
    #[error("incomplete format specifier at byte {position}; use %% (double %) instead")]
    Incomplete { position: usize },

    #[error("malformed format string - %{conversion} at byte {position}")]
    UnknownConversion { conversion: char, position: usize },

    #[error("invalid argument index at byte {position}")]
    InvalidArgumentIndex { position: usize },

    #[error("numbered and unnumbered arguments mixed at byte {position}")]
    MixedNumbering { position: usize },

    #[error("{what} given twice at byte {position}")]
    Repeated { what: InlineString, position: usize },

    #[error("width or precision too big at byte {position}")]
    WidthOverflow { position: usize },

    #[error("too few arguments: directive needs argument {required}, {supplied} supplied")]
    TooFewArguments { required: usize, supplied: usize },

    #[error("too many arguments for format string: {supplied} supplied, {consumed} used")]
    TooManyArguments { supplied: usize, consumed: usize },

    #[error("invalid value for %{conversion}: {found}")]
    InvalidArgument { conversion: char, found: InlineString },
}

/// Explicit formatting state for printf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct FormatOptions {
    /// Reject calls that supply more sequential arguments than the format uses
    pub strict_arity: bool,
}

impl FormatOptions {
    /// Ignore surplus arguments
    pub const fn lenient() -> Self {
        Self {
            strict_arity: false,
        }
    }

    pub const fn strict() -> Self {
        Self { strict_arity: true }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Directive flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `-`: left-justify within the width
    pub left: bool,
    /// `+`: always print a sign for numbers
    pub plus: bool,
    /// ` `: leading space for non-negative numbers
    pub space: bool,
    /// `0`: pad numbers with zeros
    pub zero: bool,
    /// `#`: alternate form (radix prefixes, kept decimal point)
    pub alternate: bool,
}

/// Where a width, precision or value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Literal(usize),
    /// `*`: next sequential argument
    Next,
    /// `*N$`: numbered argument (1-based)
    Numbered(usize),
}

/// Conversion character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `d`, `i`, `u`
    Decimal,
    /// `x`, `X`
    Hex { upper: bool },
    /// `o`
    Octal,
    /// `b`, `B`
    Binary { upper: bool },
    /// `f`
    Fixed,
    /// `e`, `E`
    Exponent { upper: bool },
    /// `g`, `G`
    General { upper: bool },
    /// `s`
    Str,
    /// `p`
    Inspect,
    /// `c`
    Char,
}

impl Conversion {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'd' | 'i' | 'u' => Conversion::Decimal,
            'x' => Conversion::Hex { upper: false },
            'X' => Conversion::Hex { upper: true },
            'o' => Conversion::Octal,
            'b' => Conversion::Binary { upper: false },
            'B' => Conversion::Binary { upper: true },
            'f' => Conversion::Fixed,
            'e' => Conversion::Exponent { upper: false },
            'E' => Conversion::Exponent { upper: true },
            'g' => Conversion::General { upper: false },
            'G' => Conversion::General { upper: true },
            's' => Conversion::Str,
            'p' => Conversion::Inspect,
            'c' => Conversion::Char,
            _ => return None,
        })
    }
}

/// A parsed `%...` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    /// Byte offset of the `%`
    pub position: usize,
    pub flags: Flags,
    pub width: Option<Count>,
    pub precision: Option<Count>,
    /// Explicit `N$` argument (1-based)
    pub argument: Option<usize>,
    pub conversion: Conversion,
    /// The conversion character as written (for error messages)
    pub letter: char,
}

/// A piece of a format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'f> {
    Literal(&'f [u8]),
    Directive(Directive),
}
