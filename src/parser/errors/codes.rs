//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (unterminated zones, stray terminators)
//! - E03xx: Header errors (block and geometry headers)
//! - E04xx: Record errors (parameter and atom lines)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// `%block` not closed by `end`
    E0201,
    /// Geometry block not closed by `*`
    E0202,
    /// `end` outside of a block
    E0203,
    /// Tokens after a terminator on the same line
    E0204,

    // =========================================================================
    // E03xx: Header errors
    // =========================================================================
    /// `%` without a block name
    E0301,
    /// Block name is not an identifier
    E0302,
    /// `*` without a coordinate system tag
    E0303,
    /// File-based geometry without a file name
    E0304,
    /// Extra values after the multiplicity
    E0305,

    // =========================================================================
    // E04xx: Record errors
    // =========================================================================
    /// Parameter line does not start with a key
    E0401,
    /// Atom record does not match the coordinate system
    E0402,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Line does not start with `!`, `%` or `*`
    E0901,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0901 => "E0901",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0201 => "block is not terminated by 'end'",
            Self::E0202 => "geometry block is not terminated by '*'",
            Self::E0203 => "'end' outside of a block",
            Self::E0204 => "unexpected tokens after terminator",
            Self::E0301 => "missing block name after '%'",
            Self::E0302 => "invalid block name",
            Self::E0303 => "missing coordinate system after '*'",
            Self::E0304 => "missing file name",
            Self::E0305 => "unexpected values after multiplicity",
            Self::E0401 => "expected a parameter name",
            Self::E0402 => "malformed atom record",
            Self::E0901 => "expected '!', '%' or '*' at start of line",
        }
    }

    /// Check if this error comes from an interrupted zone
    pub fn is_unterminated(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
