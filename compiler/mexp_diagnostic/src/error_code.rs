//! Error codes for all compiler diagnostics.
//!
//! Format: E#### where the first digit indicates the phase:
//! - E0xxx: Driver option errors
//! - E2xxx: Name resolution errors
//! - E9xxx: Internal compiler errors

use std::fmt;

/// Error codes for all compiler diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Option Errors (E0xxx)
    /// Compiler option out of range
    E0001,

    // Resolution Errors (E2xxx)
    /// Name defined twice where uniqueness is required
    E2001,
    /// Reference to a name with no visible definition
    E2002,

    // Internal Errors (E9xxx)
    /// Internal translation failure (invariant violation)
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::E0001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// Parse a code from its `E####` form (case-insensitive).
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(code))
    }

    /// Get the error code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line description, used by `--explain`-style output.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "invalid compiler option",
            ErrorCode::E2001 => "duplicate definition",
            ErrorCode::E2002 => "undefined identifier",
            ErrorCode::E9001 => "internal translation error",
            ErrorCode::E9002 => "too many errors",
        }
    }

    /// Check if this is an internal compiler error (E9xxx).
    pub fn is_internal(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
