use std::io;

use thiserror::Error;

use treehopper_parser::error::ParseError;

use crate::export;

/// Everything that can go wrong between reading a file and writing output.
///
/// `Parse` keeps the definition text so diagnostics can be shown with
/// snippets after the [`Session`](crate::Session) that owned it is gone.
#[derive(Debug, Error)]
pub enum TreehopperError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),

    #[error("Dump error: {0}")]
    Dump(#[from] serde_json::Error),
}

impl TreehopperError {
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
