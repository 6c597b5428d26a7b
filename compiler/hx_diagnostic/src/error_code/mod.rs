//! Error codes for all generator diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating where the problem was found. Used for `--explain` lookups.

use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: E#### where first digit indicates the area:
/// - E1xxx: Program model / reference resolution
/// - E2xxx: Code generation
/// - E3xxx: Output (VFS) and input files
/// - E9xxx: Internal errors
/// - W1xxx: Recoverable generation warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Program model errors (E1xxx)
    /// Referenced class is not in the program
    E1001,
    /// Referenced method is not declared by the class or its ancestors
    E1002,
    /// Referenced field is not declared by the class or its ancestors
    E1003,
    /// Program model input could not be decoded
    E1004,

    // Codegen errors (E2xxx)
    /// Label/goto form on a target without native jumps
    E2001,
    /// Method body refers to missing nodes, locals or labels
    E2002,
    /// Method reference to an interface without a functional adapter
    E2003,

    // Output errors (E3xxx)
    /// Writing a generated unit failed
    E3001,
    /// Reading an input file failed
    E3002,

    // Internal (E9xxx)
    /// Internal generator error
    E9001,
    /// Too many errors
    E9002,

    // Warnings
    /// Method body replaced with an errored-method stub
    W1001,
    /// Generator annotation ignored because it is malformed
    W1002,
}

impl ErrorCode {
    /// All error codes, in definition order.
    pub const ALL: &'static [ErrorCode] = &[
        // Program model
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        // Codegen
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        // Output
        ErrorCode::E3001,
        ErrorCode::E3002,
        // Internal
        ErrorCode::E9001,
        ErrorCode::E9002,
        // Warnings
        ErrorCode::W1001,
        ErrorCode::W1002,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
        }
    }

    /// Check if this is a program-model error (E1xxx range).
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }

    /// Check if this is a code generation error (E2xxx range).
    pub fn is_codegen_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003
        )
    }

    /// Check if this is an output/input error (E3xxx range).
    pub fn is_io_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E3002)
    }

    /// Check if this is an internal error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W1001 | ErrorCode::W1002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"w1001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
