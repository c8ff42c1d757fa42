//! Searches over a [`TreeNode`] tree.
//!
//! Two families of lookups live here:
//!
//! - [`find_subtree_by_name`] finds the first element with a given tag and
//!   `name` attribute and hands back its children.
//! - [`find_all_by_key`] walks the tree as a generic [`Structure`] (mappings,
//!   sequences and scalars) and reports every mapping holding a key with a
//!   given scalar value. [`find_markers`] is the same search specialised to
//!   the `name` attribute, driven by the pre-computed [`Marker`].
//!
//! All walks are depth-first pre-order with an explicit stack.

use crate::tree::{Marker, TreeNode};

/// Returns the first element in pre-order whose tag equals `tag` and whose
/// `name` attribute equals `name`.
pub fn find_node_by_name<'a>(root: &'a TreeNode, tag: &str, name: &str) -> Option<&'a TreeNode> {
    root.iter()
        .find(|node| node.tag() == tag && node.attribute("name") == Some(name))
}

/// Returns the children of the first element matching `tag` and `name`.
///
/// ```
/// # use treehopper_parser::{build_tree, find_subtree_by_name};
/// let root = build_tree(
///     r#"<Archive><chunk name="DefinitionObjects"><a/><b/></chunk></Archive>"#,
/// ).unwrap();
///
/// let objects = find_subtree_by_name(&root, "chunk", "DefinitionObjects").unwrap();
/// assert_eq!(objects.len(), 2);
/// assert!(find_subtree_by_name(&root, "chunk", "Missing").is_none());
/// ```
pub fn find_subtree_by_name<'a>(
    root: &'a TreeNode,
    tag: &str,
    name: &str,
) -> Option<&'a [TreeNode]> {
    find_node_by_name(root, tag, name).map(TreeNode::children)
}

/// A [`TreeNode`] seen as a generic nested value.
///
/// A node is the mapping `{tag, attributes, text, children}`; its attributes
/// are a mapping of scalars; its children are a sequence of node mappings.
/// The `text` entry is only present when the node has text.
#[derive(Debug, Clone, Copy)]
pub enum Structure<'a> {
    Mapping(Mapping<'a>),
    Sequence(&'a [TreeNode]),
    Scalar(&'a str),
}

/// The two kinds of mapping a tree exposes.
#[derive(Debug, Clone, Copy)]
pub enum Mapping<'a> {
    /// The node itself.
    Node(&'a TreeNode),
    /// The node's attribute map.
    Attributes(&'a TreeNode),
}

impl<'a> Mapping<'a> {
    /// The node this mapping belongs to.
    pub fn node(&self) -> &'a TreeNode {
        match *self {
            Mapping::Node(node) | Mapping::Attributes(node) => node,
        }
    }

    /// Scalar stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        match *self {
            Mapping::Node(node) => match key {
                "tag" => Some(node.tag()),
                "text" => node.text(),
                _ => None,
            },
            Mapping::Attributes(node) => node.attribute(key),
        }
    }

    /// Entries in natural key order: `tag`, `attributes`, `text`,
    /// `children` for nodes, document order for attributes.
    pub fn entries(&self) -> Vec<(&'a str, Structure<'a>)> {
        match *self {
            Mapping::Node(node) => {
                let mut entries = vec![
                    ("tag", Structure::Scalar(node.tag())),
                    ("attributes", Structure::Mapping(Mapping::Attributes(node))),
                ];
                if let Some(text) = node.text() {
                    entries.push(("text", Structure::Scalar(text)));
                }
                entries.push(("children", Structure::Sequence(node.children())));
                entries
            }
            Mapping::Attributes(node) => node
                .attributes()
                .iter()
                .map(|(name, value)| (name.as_str(), Structure::Scalar(value.as_str())))
                .collect(),
        }
    }
}

/// A mapping that held the searched key, with its enclosing node mapping.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    marker: Mapping<'a>,
    parent: Option<&'a TreeNode>,
}

impl<'a> Match<'a> {
    /// The mapping holding the key.
    pub fn marker(&self) -> Mapping<'a> {
        self.marker
    }

    /// Node mapping enclosing the matched mapping; `None` for the search root.
    pub fn parent(&self) -> Option<&'a TreeNode> {
        self.parent
    }

    /// The node carrying the value of interest.
    ///
    /// For a `name` attribute match this is the element bearing the
    /// attribute, whose text and children hold the marker's data.
    pub fn payload(&self) -> Option<&'a TreeNode> {
        self.parent
    }
}

/// Returns every mapping under `node` whose `key` holds the scalar `value`.
///
/// Results are in visitation order: a mapping is reported before anything
/// nested inside it, mapping entries are visited in natural key order and
/// sequences by index.
///
/// ```
/// # use treehopper_parser::{build_tree, find_all_by_key};
/// let root = build_tree(
///     r#"<o><item name="Name">Add</item><item name="Name">Sub</item></o>"#,
/// ).unwrap();
///
/// let matches = find_all_by_key(&root, "name", "Name");
/// let texts: Vec<_> = matches.iter().filter_map(|m| m.payload()?.text()).collect();
/// assert_eq!(texts, vec!["Add", "Sub"]);
/// ```
pub fn find_all_by_key<'a>(node: &'a TreeNode, key: &str, value: &str) -> Vec<Match<'a>> {
    let mut matches = Vec::new();
    let mut stack: Vec<(Structure<'a>, Option<&'a TreeNode>)> =
        vec![(Structure::Mapping(Mapping::Node(node)), None)];

    while let Some((structure, parent)) = stack.pop() {
        match structure {
            Structure::Mapping(mapping) => {
                if mapping.get(key) == Some(value) {
                    matches.push(Match {
                        marker: mapping,
                        parent,
                    });
                }
                // Values nested in this mapping see it as their parent.
                let owner = Some(mapping.node());
                for (_, entry) in mapping.entries().into_iter().rev() {
                    stack.push((entry, owner));
                }
            }
            Structure::Sequence(items) => {
                // Sequence items keep the parent of the sequence itself.
                for item in items.iter().rev() {
                    stack.push((Structure::Mapping(Mapping::Node(item)), parent));
                }
            }
            Structure::Scalar(_) => {}
        }
    }

    matches
}

/// An element carrying a given [`Marker`].
#[derive(Debug, Clone, Copy)]
pub struct MarkerMatch<'a> {
    marker: &'a Marker,
    payload: &'a TreeNode,
}

impl<'a> MarkerMatch<'a> {
    pub fn marker(&self) -> &'a Marker {
        self.marker
    }

    /// The element bearing the marker.
    pub fn payload(&self) -> &'a TreeNode {
        self.payload
    }

    /// Shorthand for the payload's text.
    pub fn text(&self) -> Option<&'a str> {
        self.payload.text()
    }
}

/// Returns every element under `node` (inclusive) tagged with `marker`, in
/// pre-order.
///
/// Produces the same payloads, in the same order, as
/// `find_all_by_key(node, "name", marker.as_str())`.
pub fn find_markers<'a>(node: &'a TreeNode, marker: &Marker) -> Vec<MarkerMatch<'a>> {
    node.iter()
        .filter_map(|candidate| {
            candidate
                .marker()
                .filter(|found| *found == marker)
                .map(|found| MarkerMatch {
                    marker: found,
                    payload: candidate,
                })
        })
        .collect()
}

/// Searches for `marker` inside every payload of `matches`, concatenating
/// the results in order.
///
/// This is the nested lookup used for `Container` → `Source` and
/// `OutputParam` → `InstanceGuid`.
pub fn find_markers_within<'a>(matches: &[MarkerMatch<'a>], marker: &Marker) -> Vec<MarkerMatch<'a>> {
    matches
        .iter()
        .flat_map(|outer| find_markers(outer.payload(), marker))
        .collect()
}
