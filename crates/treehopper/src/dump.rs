//! Machine-readable dump of an extracted definition.
//!
//! The dump is pretty-printed JSON:
//!
//! ```json
//! {
//!   "info": { "document_id": "...", "name": "...", "object_count": 2 },
//!   "components": [ { "index": 0, "guid": "...", ... } ],
//!   "connections": [ { "source": "...", "target": "..." } ]
//! }
//! ```

use serde::Serialize;

use treehopper_core::semantic::{Component, Definition, DefinitionInfo};

use crate::{error::TreehopperError, structure::ComponentGraph};

#[derive(Debug, Serialize)]
struct Dump<'a> {
    info: &'a DefinitionInfo,
    components: &'a [Component],
    connections: Vec<Connection<'a>>,
}

#[derive(Debug, Serialize)]
struct Connection<'a> {
    source: &'a str,
    target: &'a str,
}

/// Serializes `definition` and its inferred connections to pretty JSON.
///
/// # Errors
///
/// Returns [`TreehopperError::Graph`] if a connection lost its endpoints
/// and [`TreehopperError::Dump`] if JSON serialization fails.
pub fn to_json(definition: &Definition) -> Result<String, TreehopperError> {
    let graph = ComponentGraph::new(definition.components());
    let connections = graph
        .connections()?
        .into_iter()
        .map(|(source, target)| Connection {
            source: source.guid(),
            target: target.guid(),
        })
        .collect();

    let dump = Dump {
        info: definition.info(),
        components: definition.components(),
        connections,
    };

    Ok(serde_json::to_string_pretty(&dump)?)
}
