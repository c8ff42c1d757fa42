//! Diagnostics: severity, labelled spans and help text.

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// Whether a diagnostic stops extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        *self == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        *self == Severity::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Text pinned to a byte range of the markup.
///
/// A diagnostic has at most a handful of these. The primary one points at
/// the offending element; secondary ones point at related places, such as
/// the first object that used a duplicated guid.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(span, message.into(), true)
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(span, message.into(), false)
    }

    fn with_role(span: Span, message: String, primary: bool) -> Self {
        Self {
            span,
            message,
            primary,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.primary
    }
}

/// One problem found while reading a definition.
///
/// Rendered by the CLI roughly as:
///
/// ```text
/// error[E200]: object #2 has no `Bounds` marker
///   --> definition.ghx:41:9
///    |
/// 41 |         <chunk name="Object" index="2">
///    |         ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ object without bounds
///    |
///    = help: every object needs Bounds, InstanceGuid, Name and Pivot markers
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message.into())
    }

    fn with_severity(severity: Severity, message: String) -> Self {
        Self {
            severity,
            code: None,
            message,
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(self, code: ErrorCode) -> Self {
        Self {
            code: Some(code),
            ..self
        }
    }

    /// Adds the label that marks where the problem is.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Adds a label pointing at related context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(self, help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..self
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{code}]: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
