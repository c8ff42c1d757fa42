//! Bridges [`TreehopperError`] into miette reports.
//!
//! A parse failure may carry several diagnostics; each becomes its own
//! [`Report`] with the definition text attached so miette can draw snippets.
//! Every other failure becomes a single report without source code.

use std::{error::Error, fmt};

use miette::{LabeledSpan, Severity, SourceCode, SourceSpan};

use treehopper::TreehopperError;
use treehopper_parser::{Span, error::Diagnostic};

type Text<'a> = Box<dyn fmt::Display + 'a>;

/// One printable unit of an error.
#[derive(Debug)]
pub enum Report<'a> {
    /// A parser diagnostic together with the text it points into.
    Located { diag: &'a Diagnostic, src: &'a str },
    /// An error with no position in the input.
    Plain(&'a TreehopperError),
}

impl Report<'_> {
    fn plain_code(err: &TreehopperError) -> Option<&'static str> {
        match err {
            TreehopperError::Io(_) => Some("treehopper::io"),
            TreehopperError::Graph(_) => Some("treehopper::graph"),
            TreehopperError::Export(_) => Some("treehopper::export"),
            TreehopperError::Dump(_) => Some("treehopper::dump"),
            TreehopperError::Parse { .. } => None,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Located { diag, .. } => f.write_str(diag.message()),
            Self::Plain(err) => write!(f, "{err}"),
        }
    }
}

impl Error for Report<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Located { .. } => None,
            Self::Plain(err) => err.source(),
        }
    }
}

impl miette::Diagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Text<'a>> {
        match self {
            Self::Located { diag, .. } => diag.code().map(|code| Box::new(code) as Text<'a>),
            Self::Plain(err) => Self::plain_code(err).map(|code| Box::new(code) as Text<'a>),
        }
    }

    fn severity(&self) -> Option<Severity> {
        let Self::Located { diag, .. } = self else {
            return Some(Severity::Error);
        };
        if diag.severity().is_error() {
            Some(Severity::Error)
        } else {
            Some(Severity::Warning)
        }
    }

    fn help<'a>(&'a self) -> Option<Text<'a>> {
        match self {
            Self::Located { diag, .. } => diag.help().map(|help| Box::new(help) as Text<'a>),
            Self::Plain(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Self::Located { src, .. } => Some(src as &dyn SourceCode),
            Self::Plain(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Self::Located { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        let spans = diag.labels().iter().map(|label| {
            let text = Some(label.message().to_owned());
            let at = to_source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, at)
            } else {
                LabeledSpan::new_with_span(text, at)
            }
        });
        Some(Box::new(spans))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    (span.start(), span.len()).into()
}

/// Splits `err` into the reports the CLI prints, one per diagnostic.
pub fn reports_for(err: &TreehopperError) -> Vec<Report<'_>> {
    let TreehopperError::Parse { err: parse, src } = err else {
        return vec![Report::Plain(err)];
    };

    parse
        .diagnostics()
        .iter()
        .map(|diag| Report::Located { diag, src })
        .collect()
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic as _;
    use treehopper_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn located_report_keeps_code_and_help() {
        let diag = Diagnostic::error("object #0 has no `Bounds` marker")
            .with_code(ErrorCode::E200)
            .with_label(Span::new(0..5), "here")
            .with_help("add the marker");
        let err = TreehopperError::new_parse_error(ParseError::from(diag), "<a/>\n");

        let reports = reports_for(&err);
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert!(matches!(report, Report::Located { .. }));
        assert_eq!(report.to_string(), "object #0 has no `Bounds` marker");
        assert_eq!(report.code().unwrap().to_string(), "E200");
        assert_eq!(report.help().unwrap().to_string(), "add the marker");
        assert!(report.source_code().is_some());
    }

    #[test]
    fn one_report_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("first error").with_label(Span::new(0..5), "first"),
            Diagnostic::warning("second warning").with_label(Span::new(10..15), "second"),
        ];
        let err = TreehopperError::new_parse_error(ParseError::from(diags), "source code here...");

        let reports = reports_for(&err);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].to_string(), "first error");
        assert_eq!(reports[0].severity(), Some(Severity::Error));
        assert_eq!(reports[1].severity(), Some(Severity::Warning));
    }

    #[test]
    fn plain_report_for_graph_error() {
        let err = TreehopperError::Graph("graph error".to_string());

        let reports = reports_for(&err);
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert!(matches!(report, Report::Plain(_)));
        assert_eq!(report.to_string(), "Graph error: graph error");
        assert_eq!(report.code().unwrap().to_string(), "treehopper::graph");
        assert!(report.labels().is_none());
        assert!(report.source_code().is_none());
    }

    #[test]
    fn secondary_label_is_not_primary() {
        let diag = Diagnostic::error("duplicate")
            .with_label(Span::new(10..15), "duplicate here")
            .with_secondary_label(Span::new(0..5), "first used here");
        let report = Report::Located {
            diag: &diag,
            src: "some source code",
        };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("first used here"));
        assert_eq!(labels[1].offset(), 0);
    }
}
