//! Treehopper - render Grasshopper `.ghx` definitions as component diagrams.
//!
//! A definition is read into a [`Session`], which owns the source text, the
//! markup tree and the extracted components. The session can then be
//! rendered to SVG or dumped as JSON.

pub mod config;

mod dump;
mod error;
mod export;
mod structure;

pub use treehopper_core::{color, draw, geometry, semantic};
pub use treehopper_parser::TreeNode;

pub use error::TreehopperError;
pub use export::Error as ExportError;
pub use export::svg::{Canvas, RenderedEdge};
pub use structure::ComponentGraph;

use std::{fs, path::Path};

use log::{debug, info, trace};

use config::AppConfig;
use treehopper_core::semantic::Definition;

/// One parsed document: source text, markup tree and definition.
///
/// The session owns everything read from a single input, so diagnostics can
/// always be reported against the text they were produced from.
#[derive(Debug)]
pub struct Session {
    source: String,
    tree: TreeNode,
    definition: Definition,
}

impl Session {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// Builds the connection graph over this session's components.
    pub fn graph(&self) -> ComponentGraph<'_> {
        ComponentGraph::new(self.definition.components())
    }
}

/// Builder for parsing and rendering Grasshopper definitions.
///
/// # Examples
///
/// ```rust,no_run
/// use treehopper::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let session = builder.open("definition.ghx")
///     .expect("Failed to read definition");
///
/// let svg = builder.render_svg(&session)
///     .expect("Failed to render");
/// # let _ = svg;
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Reads and parses the definition at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TreehopperError::Io`] if the file cannot be read, or
    /// [`TreehopperError::Parse`] if it is not a readable definition.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Session, TreehopperError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Reading definition");

        let source = fs::read_to_string(path)?;
        self.parse(source)
    }

    /// Parses definition text into a [`Session`].
    ///
    /// # Errors
    ///
    /// Returns [`TreehopperError::Parse`] for malformed markup, a missing
    /// `DefinitionObjects` chunk, or an object that cannot be read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treehopper::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// assert!(builder.parse("<Archive/>").is_err());
    /// ```
    pub fn parse(&self, source: impl Into<String>) -> Result<Session, TreehopperError> {
        let source = source.into();

        let (tree, definition) = match treehopper_parser::parse(&source, self.config.extract()) {
            Ok(parsed) => parsed.into_parts(),
            Err(err) => return Err(TreehopperError::new_parse_error(err, source)),
        };

        debug!(components = definition.components().len(); "Definition parsed successfully");
        trace!(definition:?; "Parsed definition");

        Ok(Session {
            source,
            tree,
            definition,
        })
    }

    /// Renders the session's components to a [`Canvas`].
    ///
    /// # Errors
    ///
    /// Returns [`TreehopperError::Export`] if the style holds an invalid color.
    pub fn render(&self, session: &Session) -> Result<Canvas, TreehopperError> {
        export::svg::render(session.definition().components(), self.config.style())
    }

    /// Renders the session to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TreehopperError::Export`] if the style holds an invalid color,
    /// as [`render`](Self::render) does.
    pub fn render_svg(&self, session: &Session) -> Result<String, TreehopperError> {
        let canvas = self.render(session)?;
        info!(edges = canvas.edges().len(); "SVG rendered successfully");
        Ok(canvas.to_svg_string())
    }

    /// Serializes the session's definition and connections as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TreehopperError::Graph`] if a connection lost its endpoints
    /// and [`TreehopperError::Dump`] if JSON serialization fails.
    pub fn dump_json(&self, session: &Session) -> Result<String, TreehopperError> {
        dump::to_json(session.definition())
    }
}
