//! Diagnostics produced while reading a `.ghx` document.
//!
//! Every failure is a [`Diagnostic`] carrying an [`ErrorCode`], the spans it
//! concerns and optional help. [`parse`](crate::parse) returns them wrapped
//! in a [`ParseError`].
//!
//! ```
//! # use treehopper_parser::error::{Diagnostic, ErrorCode};
//! # use treehopper_parser::Span;
//! let diag = Diagnostic::error("instance guid `a1` is used by more than one object")
//!     .with_code(ErrorCode::E202)
//!     .with_label(Span::new(400..520), "duplicate here")
//!     .with_secondary_label(Span::new(100..220), "first used here");
//!
//! assert_eq!(diag.labels().len(), 2);
//! ```

mod diagnostic;
mod error_code;

use std::fmt;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;

pub(crate) type Result<T> = std::result::Result<T, Diagnostic>;

/// Failure of [`parse`](crate::parse); holds at least one diagnostic.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.diagnostics.split_first() else {
            return Ok(());
        };
        write!(f, "{first}")?;
        match rest.len() {
            0 => Ok(()),
            more => write!(f, " (+{more} more)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}
