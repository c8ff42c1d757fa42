//! Treehopper parser - reads Grasshopper `.ghx` definitions.
//!
//! The pipeline has three stages:
//!
//! 1. [`build_tree`] turns the markup into an owned [`TreeNode`] tree.
//! 2. The locator ([`find_subtree_by_name`], [`find_all_by_key`],
//!    [`find_markers`]) finds elements by their `name` attribute.
//! 3. [`extract_components`] reads one
//!    [`Component`](treehopper_core::semantic::Component) per graph object.
//!
//! [`parse`] runs all three and returns a [`ParsedDocument`].
//!
//! # Example
//!
//! ```
//! use treehopper_parser::{ExtractConfig, parse};
//!
//! let source = r#"<Archive>
//!   <chunk name="DefinitionObjects">
//!     <chunk name="Object">
//!       <item name="Bounds"><X>0</X><Y>0</Y><W>100</W><H>50</H></item>
//!       <item name="InstanceGuid">a1</item>
//!       <item name="Name">Add</item>
//!       <item name="Pivot"><X>10</X><Y>25</Y></item>
//!     </chunk>
//!   </chunk>
//! </Archive>"#;
//!
//! let document = parse(source, &ExtractConfig::default()).unwrap();
//! assert_eq!(document.definition().components()[0].name(), "Add");
//! ```

pub mod error;

mod extract;
mod locate;
mod span;
mod tree;

pub use extract::{
    ExtractConfig, OutputRule, check_object_count, extract_components, object_nodes,
    read_definition_info,
};
pub use locate::{
    Mapping, MarkerMatch, Match, Structure, find_all_by_key, find_markers, find_markers_within,
    find_node_by_name, find_subtree_by_name,
};
pub use span::Span;
pub use tree::{Marker, PreOrder, TreeNode, build_tree};

use log::{debug, info};

use treehopper_core::semantic::Definition;

use error::{Diagnostic, ErrorCode, ParseError};

/// The result of [`parse`]: the markup tree and the definition read from it.
#[derive(Debug)]
pub struct ParsedDocument {
    tree: TreeNode,
    definition: Definition,
}

impl ParsedDocument {
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// Splits the document into its tree and definition.
    pub fn into_parts(self) -> (TreeNode, Definition) {
        (self.tree, self.definition)
    }
}

/// Parses a `.ghx` document into its tree and component definition.
///
/// # Errors
///
/// Returns a [`ParseError`] when the markup is malformed (`E001`), the
/// `DefinitionObjects` chunk is missing (`E100`), or any object cannot be
/// read (`E2xx`/`E3xx`).
pub fn parse(source: &str, config: &ExtractConfig) -> Result<ParsedDocument, ParseError> {
    info!(bytes = source.len(); "Parsing definition");

    let tree = build_tree(source)?;
    debug!(elements = tree.element_count(); "Markup tree built");

    let objects = find_subtree_by_name(&tree, "chunk", Marker::DefinitionObjects.as_str())
        .ok_or_else(|| {
            Diagnostic::error("document has no `DefinitionObjects` chunk")
                .with_code(ErrorCode::E100)
                .with_label(tree.span(), "expected a DefinitionObjects chunk inside")
                .with_help("export the definition from Grasshopper as .ghx")
        })?;

    let info = read_definition_info(&tree);
    debug!(info:?; "Definition header");

    let components = extract_components(objects, config)?;
    check_object_count(&info, components.len());

    info!(components = components.len(); "Definition parsed");

    let definition = Definition::new(info, components);
    Ok(ParsedDocument { tree, definition })
}
