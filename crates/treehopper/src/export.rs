//! Diagram export backends.

pub mod svg;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A style value could not be turned into something drawable.
    #[error("Render error: {0}")]
    Render(String),
}
