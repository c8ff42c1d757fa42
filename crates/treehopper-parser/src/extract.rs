//! Component extraction from the `DefinitionObjects` subtree.
//!
//! Each graph object is read through its markers:
//!
//! | Marker | Field | Required |
//! |--------|-------|----------|
//! | `Bounds` | position, size (children 0-3, integers) | yes |
//! | `InstanceGuid` | guid (first in the object) | yes |
//! | `Name` | name (first in the object) | yes |
//! | `Value` | value | no |
//! | `Container` → `Source` | inputs | no |
//! | `OutputParam` → `InstanceGuid` | output | no |
//! | `Pivot` | pivot (children 0-1, floats) | yes |
//!
//! Any failure aborts the whole extraction; no partial list is returned.

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::Deserialize;

use treehopper_core::semantic::{Component, DefinitionInfo};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    locate::{MarkerMatch, find_markers, find_markers_within, find_node_by_name},
    span::Span,
    tree::{Marker, TreeNode},
};

/// When a component's output identifier is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputRule {
    /// Read the output only when the object also has an `InputParam` marker.
    #[default]
    RequireInputParam,
    /// Read the output whenever an `OutputParam` marker exists.
    OutputParamOnly,
}

/// Options controlling extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    output_rule: OutputRule,
}

impl ExtractConfig {
    pub fn new(output_rule: OutputRule) -> Self {
        Self { output_rule }
    }

    pub fn output_rule(&self) -> OutputRule {
        self.output_rule
    }
}

/// Expands the raw children of the objects chunk into one entry per object.
///
/// A `chunks` wrapper is flattened into its own children and the `items`
/// header (which holds `ObjectCount`) is skipped. Any other child is an
/// object on its own.
pub fn object_nodes(objects: &[TreeNode]) -> Vec<&TreeNode> {
    let mut nodes = Vec::new();
    for child in objects {
        match child.tag() {
            "chunks" => nodes.extend(child.children()),
            "items" => {}
            _ => nodes.push(child),
        }
    }
    nodes
}

/// Builds one [`Component`] per object, in document order.
///
/// # Errors
///
/// - [`ErrorCode::E200`] when a required marker is missing
/// - [`ErrorCode::E201`] when a required payload has no value
/// - [`ErrorCode::E202`] when two objects share an instance guid
/// - [`ErrorCode::E300`] / [`ErrorCode::E301`] when bounds or pivot values
///   are not numbers
pub fn extract_components(objects: &[TreeNode], config: &ExtractConfig) -> Result<Vec<Component>> {
    let nodes = object_nodes(objects);
    let mut components = Vec::with_capacity(nodes.len());
    let mut seen: HashMap<String, Span> = HashMap::new();

    for (index, object) in nodes.into_iter().enumerate() {
        let component = ObjectReader::new(index, object).read(config)?;

        if let Some(first) = seen.get(component.guid()) {
            return Err(Diagnostic::error(format!(
                "instance guid `{}` is used by more than one object",
                component.guid()
            ))
            .with_code(ErrorCode::E202)
            .with_label(object.span(), format!("object #{index} reuses it"))
            .with_secondary_label(*first, "first used here")
            .with_help("every object in a definition needs its own InstanceGuid"));
        }
        seen.insert(component.guid().to_string(), object.span());

        trace!(
            index,
            guid = component.guid(),
            name = component.name(),
            inputs = component.inputs().len();
            "Extracted component"
        );
        components.push(component);
    }

    debug!(count = components.len(); "Extracted components");
    Ok(components)
}

/// Reads the optional document header fields.
///
/// Nothing here can fail: missing or unreadable values are `None`.
pub fn read_definition_info(root: &TreeNode) -> DefinitionInfo {
    let document_id = find_node_by_name(root, "chunk", "DocumentHeader")
        .and_then(|header| first_text(header, &Marker::DocumentId));

    let name = find_node_by_name(root, "chunk", "DefinitionProperties")
        .and_then(|properties| first_text(properties, &Marker::Name));

    let object_count = find_node_by_name(root, "chunk", Marker::DefinitionObjects.as_str())
        .and_then(|objects| {
            objects
                .children()
                .iter()
                .filter(|child| child.tag() == "items")
                .find_map(|items| first_text(items, &Marker::ObjectCount))
        })
        .and_then(|count| match count.parse::<usize>() {
            Ok(count) => Some(count),
            Err(err) => {
                debug!(value = count.as_str(), err:%; "Ignoring unreadable ObjectCount");
                None
            }
        });

    DefinitionInfo::new(document_id, name, object_count)
}

/// Logs a warning when the declared object count disagrees with what was
/// extracted. Returns `true` when they agree or nothing was declared.
pub fn check_object_count(info: &DefinitionInfo, extracted: usize) -> bool {
    match info.object_count() {
        Some(declared) if declared != extracted => {
            warn!(declared, extracted; "ObjectCount does not match the number of objects");
            false
        }
        _ => true,
    }
}

fn first_text(node: &TreeNode, marker: &Marker) -> Option<String> {
    find_markers(node, marker)
        .first()
        .and_then(MarkerMatch::text)
        .map(str::to_string)
}

/// Reads the fields of a single object.
struct ObjectReader<'a> {
    index: usize,
    object: &'a TreeNode,
}

impl<'a> ObjectReader<'a> {
    fn new(index: usize, object: &'a TreeNode) -> Self {
        Self { index, object }
    }

    fn read(&self, config: &ExtractConfig) -> Result<Component> {
        let bounds = self.required(&Marker::Bounds)?;
        let x = self.integer(bounds, 0, "x")?;
        let y = self.integer(bounds, 1, "y")?;
        let width = self.integer(bounds, 2, "width")?;
        let height = self.integer(bounds, 3, "height")?;

        let guid = self.required_text(&Marker::InstanceGuid)?;
        let name = self.required_text(&Marker::Name)?;

        let value = find_markers(self.object, &Marker::Value)
            .first()
            .and_then(MarkerMatch::text)
            .map(str::to_string);

        let inputs = self.inputs();
        let output = self.output(config);

        let pivot = self.required(&Marker::Pivot)?;
        let pivot_x = self.float(pivot, 0, "x")?;
        let pivot_y = self.float(pivot, 1, "y")?;

        Ok(Component::new(self.index, (x, y), (width, height), guid, name)
            .with_value(value)
            .with_inputs(inputs)
            .with_output(output)
            .with_pivot((pivot_x, pivot_y)))
    }

    fn inputs(&self) -> Vec<String> {
        let containers = find_markers(self.object, &Marker::Container);
        find_markers_within(&containers, &Marker::Source)
            .iter()
            .filter_map(MarkerMatch::text)
            .map(str::to_string)
            .collect()
    }

    fn output(&self, config: &ExtractConfig) -> Option<String> {
        if config.output_rule() == OutputRule::RequireInputParam
            && find_markers(self.object, &Marker::InputParam).is_empty()
        {
            return None;
        }

        let params = find_markers(self.object, &Marker::OutputParam);
        find_markers_within(&params, &Marker::InstanceGuid)
            .first()
            .and_then(MarkerMatch::text)
            .map(str::to_string)
    }

    /// First element carrying `marker`, or an E200 diagnostic.
    fn required(&self, marker: &Marker) -> Result<&'a TreeNode> {
        find_markers(self.object, marker)
            .first()
            .map(MarkerMatch::payload)
            .ok_or_else(|| {
                Diagnostic::error(format!(
                    "object #{} has no `{marker}` marker",
                    self.index
                ))
                .with_code(ErrorCode::E200)
                .with_label(self.object.span(), format!("missing `{marker}`"))
                .with_help("every object needs Bounds, InstanceGuid, Name and Pivot markers")
            })
    }

    fn required_text(&self, marker: &Marker) -> Result<String> {
        let payload = self.required(marker)?;
        payload.text().map(str::to_string).ok_or_else(|| {
            Diagnostic::error(format!(
                "`{marker}` of object #{} has no value",
                self.index
            ))
            .with_code(ErrorCode::E201)
            .with_label(payload.span(), "empty value")
        })
    }

    /// Text of the `position`-th child of `payload`, or an E201 diagnostic.
    fn child_text(&self, payload: &'a TreeNode, position: usize, field: &str) -> Result<&'a str> {
        payload
            .children()
            .get(position)
            .and_then(TreeNode::text)
            .ok_or_else(|| {
                let marker = payload.marker().map_or("payload", Marker::as_str);
                Diagnostic::error(format!(
                    "`{marker}` of object #{} has no {field} value",
                    self.index
                ))
                .with_code(ErrorCode::E201)
                .with_label(payload.span(), format!("expected a value at position {position}"))
            })
    }

    fn integer(&self, payload: &'a TreeNode, position: usize, field: &str) -> Result<i32> {
        let text = self.child_text(payload, position, field)?;
        text.parse::<i32>().map_err(|err| {
            Diagnostic::error(format!(
                "invalid integer `{text}` for {field} of object #{}: {err}",
                self.index
            ))
            .with_code(ErrorCode::E300)
            .with_label(payload.children()[position].span(), "not an integer")
        })
    }

    fn float(&self, payload: &'a TreeNode, position: usize, field: &str) -> Result<f64> {
        let text = self.child_text(payload, position, field)?;
        text.parse::<f64>().map_err(|err| {
            Diagnostic::error(format!(
                "invalid float `{text}` for pivot {field} of object #{}: {err}",
                self.index
            ))
            .with_code(ErrorCode::E301)
            .with_label(payload.children()[position].span(), "not a number")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    fn object(body: &str) -> String {
        format!(r#"<chunk name="Object">{body}</chunk>"#)
    }

    fn full_object(guid: &str, extra: &str) -> String {
        object(&format!(
            r#"<item name="Bounds"><X>0</X><Y>10</Y><W>100</W><H>50</H></item>
               <item name="InstanceGuid">{guid}</item>
               <item name="Name">Add</item>
               <item name="Pivot"><X>10.5</X><Y>25</Y></item>
               {extra}"#
        ))
    }

    fn objects(bodies: &[String]) -> TreeNode {
        build_tree(&format!(
            r#"<chunk name="DefinitionObjects">{}</chunk>"#,
            bodies.join("")
        ))
        .unwrap()
    }

    fn extract(root: &TreeNode) -> Result<Vec<Component>> {
        extract_components(root.children(), &ExtractConfig::default())
    }

    #[test]
    fn test_extract_minimal_object() {
        let root = objects(&[full_object("a1", "")]);
        let components = extract(&root).unwrap();

        assert_eq!(components.len(), 1);
        let c = &components[0];
        assert_eq!(c.index(), 0);
        assert_eq!(c.position(), (0, 10));
        assert_eq!(c.size(), (100, 50));
        assert_eq!(c.guid(), "a1");
        assert_eq!(c.name(), "Add");
        assert_eq!(c.value(), None);
        assert_eq!(c.pivot(), (10.5, 25.0));
        assert!(c.inputs().is_empty());
        assert_eq!(c.output(), None);
    }

    #[test]
    fn test_value_read_when_present() {
        let root = objects(&[full_object("a1", r#"<item name="Value">5</item>"#)]);
        assert_eq!(extract(&root).unwrap()[0].value(), Some("5"));
    }

    #[test]
    fn test_inputs_from_container_sources() {
        let extra = r#"
            <chunk name="Container">
              <item name="Source">x</item>
              <item name="Source"/>
              <item name="Source">y</item>
            </chunk>
            <item name="Source">outside</item>"#;
        let root = objects(&[full_object("a1", extra)]);

        assert_eq!(extract(&root).unwrap()[0].inputs(), ["x", "y"]);
    }

    #[test]
    fn test_output_requires_input_param_by_default() {
        let output = r#"<chunk name="OutputParam"><item name="InstanceGuid">o1</item></chunk>"#;
        let root = objects(&[full_object("a1", output)]);

        assert_eq!(extract(&root).unwrap()[0].output(), None);

        let relaxed = ExtractConfig::new(OutputRule::OutputParamOnly);
        let components = extract_components(root.children(), &relaxed).unwrap();
        assert_eq!(components[0].output(), Some("o1"));
    }

    #[test]
    fn test_output_with_input_param() {
        let extra = r#"
            <chunk name="InputParam"><item name="InstanceGuid">i1</item></chunk>
            <chunk name="OutputParam"><item name="InstanceGuid">o1</item></chunk>
            <chunk name="OutputParam"><item name="InstanceGuid">o2</item></chunk>"#;
        let root = objects(&[full_object("a1", extra)]);

        assert_eq!(extract(&root).unwrap()[0].output(), Some("o1"));
    }

    #[test]
    fn test_input_param_without_output_param_degrades() {
        let extra = r#"<chunk name="InputParam"/>"#;
        let root = objects(&[full_object("a1", extra)]);
        assert_eq!(extract(&root).unwrap()[0].output(), None);
    }

    #[test]
    fn test_chunks_expanded_and_items_skipped() {
        let source = format!(
            r#"<chunk name="DefinitionObjects">
                 <items><item name="ObjectCount">2</item></items>
                 <chunks>{}{}</chunks>
               </chunk>"#,
            full_object("a1", ""),
            full_object("b2", "")
        );
        let root = build_tree(&source).unwrap();
        let components = extract(&root).unwrap();

        let guids: Vec<&str> = components.iter().map(Component::guid).collect();
        assert_eq!(guids, vec!["a1", "b2"]);
        assert_eq!(components[1].index(), 1);
    }

    #[test]
    fn test_empty_objects() {
        let root = objects(&[]);
        assert!(extract(&root).unwrap().is_empty());
    }

    #[test]
    fn test_missing_bounds_names_object() {
        let broken = object(
            r#"<item name="InstanceGuid">b</item><item name="Name">N</item>
               <item name="Pivot"><X>0</X><Y>0</Y></item>"#,
        );
        let root = objects(&[full_object("a", ""), broken]);
        let err = extract(&root).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::E200));
        assert!(err.message().contains("#1"));
        assert!(err.message().contains("Bounds"));
    }

    #[test]
    fn test_missing_pivot() {
        let broken = object(
            r#"<item name="Bounds"><X>0</X><Y>0</Y><W>1</W><H>1</H></item>
               <item name="InstanceGuid">b</item><item name="Name">N</item>"#,
        );
        let err = extract(&objects(&[broken])).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E200));
        assert!(err.message().contains("Pivot"));
    }

    #[test]
    fn test_short_bounds() {
        let broken = object(
            r#"<item name="Bounds"><X>0</X><Y>0</Y><W>1</W></item>
               <item name="InstanceGuid">b</item><item name="Name">N</item>
               <item name="Pivot"><X>0</X><Y>0</Y></item>"#,
        );
        let err = extract(&objects(&[broken])).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E201));
        assert!(err.message().contains("height"));
    }

    #[test]
    fn test_empty_guid() {
        let broken = object(
            r#"<item name="Bounds"><X>0</X><Y>0</Y><W>1</W><H>1</H></item>
               <item name="InstanceGuid"/><item name="Name">N</item>
               <item name="Pivot"><X>0</X><Y>0</Y></item>"#,
        );
        let err = extract(&objects(&[broken])).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E201));
    }

    #[test]
    fn test_non_integer_bounds() {
        let broken = object(
            r#"<item name="Bounds"><X>0</X><Y>abc</Y><W>1</W><H>1</H></item>
               <item name="InstanceGuid">b</item><item name="Name">N</item>
               <item name="Pivot"><X>0</X><Y>0</Y></item>"#,
        );
        let err = extract(&objects(&[broken])).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E300));
        assert!(err.message().contains("abc"));
    }

    #[test]
    fn test_non_float_pivot() {
        let broken = object(
            r#"<item name="Bounds"><X>0</X><Y>0</Y><W>1</W><H>1</H></item>
               <item name="InstanceGuid">b</item><item name="Name">N</item>
               <item name="Pivot"><X>left</X><Y>0</Y></item>"#,
        );
        let err = extract(&objects(&[broken])).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E301));
    }

    #[test]
    fn test_duplicate_guid() {
        let root = objects(&[full_object("same", ""), full_object("same", "")]);
        let err = extract(&root).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::E202));
        assert_eq!(err.labels().len(), 2);
        assert!(err.labels()[1].is_secondary());
        assert!(err.labels()[1].span().start() < err.labels()[0].span().start());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let root = objects(&[full_object("a", ""), full_object("b", "")]);
        assert_eq!(extract(&root).unwrap(), extract(&root).unwrap());
    }

    #[test]
    fn test_read_definition_info() {
        let root = build_tree(
            r#"<Archive>
                 <chunk name="DocumentHeader"><items><item name="DocumentID">doc-1</item></items></chunk>
                 <chunk name="DefinitionProperties"><items><item name="Name">demo.ghx</item></items></chunk>
                 <chunk name="DefinitionObjects">
                   <items><item name="ObjectCount">3</item></items>
                 </chunk>
               </Archive>"#,
        )
        .unwrap();

        let info = read_definition_info(&root);
        assert_eq!(info.document_id(), Some("doc-1"));
        assert_eq!(info.name(), Some("demo.ghx"));
        assert_eq!(info.object_count(), Some(3));

        assert!(check_object_count(&info, 3));
        assert!(!check_object_count(&info, 2));
    }

    #[test]
    fn test_read_definition_info_missing_fields() {
        let root = build_tree(
            r#"<Archive><chunk name="DefinitionObjects">
                 <items><item name="ObjectCount">many</item></items>
               </chunk></Archive>"#,
        )
        .unwrap();

        let info = read_definition_info(&root);
        assert_eq!(info, DefinitionInfo::default());
        assert!(check_object_count(&info, 7));
    }

    #[test]
    fn test_output_rule_deserialize() {
        use serde::de::{IntoDeserializer, value::Error};

        let rule = OutputRule::deserialize("output-param-only".into_deserializer())
            .map_err(|err: Error| err)
            .unwrap();
        assert_eq!(rule, OutputRule::OutputParamOnly);

        let rule = OutputRule::deserialize("require-input-param".into_deserializer())
            .map_err(|err: Error| err)
            .unwrap();
        assert_eq!(rule, OutputRule::RequireInputParam);
    }
}
