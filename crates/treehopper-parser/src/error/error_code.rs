//! Error codes for the ghx diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Markup errors
//! - `E1xx` - Document structure errors
//! - `E2xx` - Component extraction errors
//! - `E3xx` - Value conversion errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Markup Errors (E0xx)
    // =========================================================================
    /// Malformed markup.
    ///
    /// The input is not well-formed XML: unclosed or mismatched tags,
    /// invalid characters, or no root element.
    E001,

    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Missing objects chunk.
    ///
    /// No `chunk` element named `DefinitionObjects` exists in the document.
    E100,

    // =========================================================================
    // Extraction Errors (E2xx)
    // =========================================================================
    /// Malformed component.
    ///
    /// An object lacks one of the required markers: `Bounds`,
    /// `InstanceGuid`, `Name` or `Pivot`.
    E200,

    /// Missing payload value.
    ///
    /// A required marker exists but its payload has no text or too few
    /// child values.
    E201,

    /// Duplicate instance guid.
    ///
    /// Two objects in the same document carry the same instance guid.
    E202,

    // =========================================================================
    // Conversion Errors (E3xx)
    // =========================================================================
    /// Invalid integer.
    ///
    /// A bounds value could not be read as a whole number.
    E300,

    /// Invalid float.
    ///
    /// A pivot coordinate could not be read as a number.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed markup",
            ErrorCode::E100 => "missing objects chunk",
            ErrorCode::E200 => "malformed component",
            ErrorCode::E201 => "missing payload value",
            ErrorCode::E202 => "duplicate instance guid",
            ErrorCode::E300 => "invalid integer",
            ErrorCode::E301 => "invalid float",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
