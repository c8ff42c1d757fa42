//! Component model extracted from a Grasshopper definition.
//!
//! # Pipeline Position
//!
//! ```text
//! .ghx markup
//!     ↓ tree builder
//! TreeNode tree
//!     ↓ locator + extractor
//! Definition (these types)
//!     ↓ connection graph
//! ComponentGraph
//!     ↓ export
//! SVG
//! ```
//!
//! All types are plain data. They serialize with serde so the extracted
//! model can be dumped as JSON next to the rendered diagram.

use std::fmt;

use serde::Serialize;

use crate::geometry::{Bounds, Point, Size};

/// One Grasshopper graph object: its canvas geometry, identity and wiring.
///
/// # Examples
///
/// ```
/// # use treehopper_core::semantic::Component;
/// let add = Component::new(0, (0, 0), (100, 50), "a1", "Add")
///     .with_inputs(vec!["x".to_string()])
///     .with_output(Some("o1".to_string()));
///
/// assert_eq!(add.port_id(), "o1");
/// assert_eq!(add.label(), "Guid: a1\nName: Add");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    index: usize,
    position: (i32, i32),
    size: (i32, i32),
    guid: String,
    name: String,
    value: Option<String>,
    pivot: (f64, f64),
    inputs: Vec<String>,
    output: Option<String>,
}

impl Component {
    /// Creates a component with no value, no wiring and a pivot at the origin.
    pub fn new(
        index: usize,
        position: (i32, i32),
        size: (i32, i32),
        guid: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            index,
            position,
            size,
            guid: guid.into(),
            name: name.into(),
            value: None,
            pivot: (0.0, 0.0),
            inputs: Vec::new(),
            output: None,
        }
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn with_pivot(mut self, pivot: (f64, f64)) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<String>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_output(mut self, output: Option<String>) -> Self {
        self.output = output;
        self
    }

    /// Position of the object among the definition's objects.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Top-left canvas coordinate.
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    /// Width and height.
    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn pivot(&self) -> (f64, f64) {
        self.pivot
    }

    /// Identifiers this component consumes, in document order.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Identifier downstream components reference: the output when
    /// published, the instance guid otherwise.
    pub fn port_id(&self) -> &str {
        self.output.as_deref().unwrap_or(&self.guid)
    }

    /// The two-line label drawn in the middle of the rectangle.
    pub fn label(&self) -> String {
        format!("Guid: {}\nName: {}", self.guid, self.name)
    }

    /// Canvas rectangle covered by the component.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(
            Point::new(self.position.0 as f32, self.position.1 as f32),
            Size::new(self.size.0 as f32, self.size.1 as f32),
        )
    }

    pub fn pivot_point(&self) -> Point {
        Point::new(self.pivot.0 as f32, self.pivot.1 as f32)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.guid)
    }
}

/// Document header metadata. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefinitionInfo {
    document_id: Option<String>,
    name: Option<String>,
    object_count: Option<usize>,
}

impl DefinitionInfo {
    pub fn new(
        document_id: Option<String>,
        name: Option<String>,
        object_count: Option<usize>,
    ) -> Self {
        Self {
            document_id,
            name,
            object_count,
        }
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Object count declared in the header.
    pub fn object_count(&self) -> Option<usize> {
        self.object_count
    }
}

/// A parsed definition: header info plus components in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Definition {
    info: DefinitionInfo,
    components: Vec<Component>,
}

impl Definition {
    pub fn new(info: DefinitionInfo, components: Vec<Component>) -> Self {
        Self { info, components }
    }

    pub fn info(&self) -> &DefinitionInfo {
        &self.info
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn find_by_guid(&self, guid: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.guid() == guid)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
