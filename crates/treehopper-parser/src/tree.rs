//! Generic element tree built from `.ghx` markup.
//!
//! The markup is read as a `quick-xml` event stream and assembled into owned
//! [`TreeNode`]s on an explicit stack, so later stages never borrow from the
//! reader and deeply nested documents cannot exhaust the call stack.
//!
//! ```
//! # use treehopper_parser::{Marker, build_tree};
//! let root = build_tree(r#"<chunk name="Bounds"><X>0</X><Y>5</Y></chunk>"#).unwrap();
//!
//! assert_eq!(root.tag(), "chunk");
//! assert_eq!(root.marker(), Some(&Marker::Bounds));
//! assert_eq!(root.children()[1].text(), Some("5"));
//! ```

use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use log::trace;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// The value of an element's `name` attribute, classified.
///
/// Grasshopper tags every meaningful element with a `name` attribute; the
/// extractor only cares about a handful of them. Everything else is kept
/// verbatim in [`Marker::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    Bounds,
    InstanceGuid,
    Name,
    Value,
    Container,
    Source,
    OutputParam,
    InputParam,
    Pivot,
    DefinitionObjects,
    ObjectCount,
    DocumentId,
    Other(String),
}

impl Marker {
    /// Classifies a `name` attribute value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Bounds" => Self::Bounds,
            "InstanceGuid" => Self::InstanceGuid,
            "Name" => Self::Name,
            "Value" => Self::Value,
            "Container" => Self::Container,
            "Source" => Self::Source,
            "OutputParam" => Self::OutputParam,
            "InputParam" => Self::InputParam,
            "Pivot" => Self::Pivot,
            "DefinitionObjects" => Self::DefinitionObjects,
            "ObjectCount" => Self::ObjectCount,
            "DocumentID" => Self::DocumentId,
            other => Self::Other(other.to_string()),
        }
    }

    /// The attribute value this marker was read from.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bounds => "Bounds",
            Self::InstanceGuid => "InstanceGuid",
            Self::Name => "Name",
            Self::Value => "Value",
            Self::Container => "Container",
            Self::Source => "Source",
            Self::OutputParam => "OutputParam",
            Self::InputParam => "InputParam",
            Self::Pivot => "Pivot",
            Self::DefinitionObjects => "DefinitionObjects",
            Self::ObjectCount => "ObjectCount",
            Self::DocumentId => "DocumentID",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One markup element.
///
/// Equality compares tag, attributes (in order), text and children. Spans
/// are ignored so that a tree equals the tree rebuilt from its own
/// [`to_markup`](TreeNode::to_markup) output.
#[derive(Debug, Clone)]
pub struct TreeNode {
    tag: String,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<TreeNode>,
    marker: Option<Marker>,
    span: Span,
}

impl TreeNode {
    /// Creates a node. The marker is derived from the `name` attribute.
    ///
    /// `text` is trimmed and dropped when blank.
    pub fn new(
        tag: impl Into<String>,
        attributes: IndexMap<String, String>,
        text: Option<&str>,
        children: Vec<TreeNode>,
        span: Span,
    ) -> Self {
        let marker = attributes.get("name").map(|name| Marker::from_name(name));
        let text = text
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        Self {
            tag: tag.into(),
            attributes,
            text,
            children,
            marker,
            span,
        }
    }

    /// Element local name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Trimmed text before the first child element, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Classified `name` attribute; `None` when the element has no `name`.
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// Byte range of the element in the source it was built from.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Depth-first pre-order iterator over this node and its descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of elements in this subtree, including `self`.
    pub fn element_count(&self) -> usize {
        self.iter().count()
    }

    /// Serializes the tree back to markup.
    ///
    /// Only what the tree models is written: tag, attributes, text and
    /// children. Comments, processing instructions and text after child
    /// elements are not preserved.
    pub fn to_markup(&self) -> String {
        enum Step<'a> {
            Open(&'a TreeNode),
            Close(&'a TreeNode),
        }

        let mut out = String::new();
        let mut steps = vec![Step::Open(self)];

        while let Some(step) = steps.pop() {
            match step {
                Step::Open(node) => {
                    out.push('<');
                    out.push_str(&node.tag);
                    for (name, value) in &node.attributes {
                        let _ = write!(out, " {name}=\"{}\"", escape(value));
                    }

                    if node.text.is_none() && node.children.is_empty() {
                        out.push_str("/>");
                        continue;
                    }

                    out.push('>');
                    if let Some(text) = &node.text {
                        out.push_str(&escape(text));
                    }
                    steps.push(Step::Close(node));
                    steps.extend(node.children.iter().rev().map(Step::Open));
                }
                Step::Close(node) => {
                    let _ = write!(out, "</{}>", node.tag);
                }
            }
        }

        out
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.attributes.iter().eq(other.attributes.iter())
            && self.text == other.text
            && self.children == other.children
    }
}

impl Eq for TreeNode {}

/// Iterator returned by [`TreeNode::iter`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// An element whose end tag has not been read yet.
struct OpenElement {
    tag: String,
    attributes: IndexMap<String, String>,
    text: String,
    seen_child: bool,
    children: Vec<TreeNode>,
    start_tag: Span,
}

impl OpenElement {
    fn new(element: &BytesStart<'_>, start_tag: Span) -> Result<Self> {
        let mut attributes = IndexMap::new();
        for attr in element.attributes() {
            let attr = attr
                .map_err(|err| malformed(format!("malformed attribute: {err}"), start_tag))?;
            let value = attr
                .unescape_value()
                .map_err(|err| malformed(format!("malformed attribute: {err}"), start_tag))?;
            attributes.insert(lossy(attr.key.local_name().as_ref()), value.into_owned());
        }

        Ok(Self {
            tag: lossy(element.local_name().as_ref()),
            attributes,
            text: String::new(),
            seen_child: false,
            children: Vec::new(),
            start_tag,
        })
    }

    fn finish(self, end: usize) -> TreeNode {
        let span = Span::new(self.start_tag.start()..end);
        TreeNode::new(
            self.tag,
            self.attributes,
            Some(self.text.as_str()),
            self.children,
            span,
        )
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses markup text into a [`TreeNode`] tree rooted at the document element.
///
/// The markup is read as a stream of events and every open element lives on
/// an explicit stack, so nesting depth is bounded by memory rather than by
/// the call stack.
///
/// # Errors
///
/// Returns an [`ErrorCode::E001`] diagnostic labelled at the offending
/// position when the markup is not well-formed.
pub fn build_tree(source: &str) -> Result<TreeNode> {
    let (base, markup) = match source.strip_prefix('\u{feff}') {
        Some(rest) => ('\u{feff}'.len_utf8(), rest),
        None => (0, source),
    };

    let mut reader = Reader::from_str(markup);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<TreeNode> = None;

    loop {
        let start = base + reader.buffer_position();
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(malformed(
                    format!("malformed markup: {err}"),
                    token_at(source, start),
                ));
            }
        };
        let end = base + reader.buffer_position();
        let here = Span::new(start..end);

        match event {
            Event::Start(element) => {
                match stack.last_mut() {
                    Some(parent) => parent.seen_child = true,
                    None if root.is_some() => return Err(extra_root(here)),
                    None => {}
                }
                stack.push(OpenElement::new(&element, here)?);
            }
            Event::Empty(element) => {
                let node = OpenElement::new(&element, here)?.finish(end);
                attach(&mut stack, &mut root, node, here)?;
            }
            Event::End(_) => {
                let Some(open) = stack.pop() else {
                    return Err(malformed("closing tag without a matching opening tag", here));
                };
                attach(&mut stack, &mut root, open.finish(end), here)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| malformed(format!("malformed text: {err}"), here))?;
                push_text(&mut stack, &value, here)?;
            }
            Event::CData(data) => {
                let value = reader
                    .decoder()
                    .decode(&data)
                    .map_err(|err| malformed(format!("malformed CDATA: {err}"), here))?;
                push_text(&mut stack, &value, here)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Diagnostic::error(format!("element `<{}>` is never closed", open.tag))
            .with_code(ErrorCode::E001)
            .with_label(open.start_tag, "opened here")
            .with_help(WELL_FORMED_HELP));
    }

    let root = root.ok_or_else(|| {
        Diagnostic::error("document has no root element")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..source.len()), "empty document")
    })?;

    trace!(elements = root.element_count(); "Built markup tree");
    Ok(root)
}

/// Hands a finished element to its parent, or makes it the document root.
fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<TreeNode>,
    node: TreeNode,
    at: Span,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.seen_child = true;
            parent.children.push(node);
        }
        None if root.is_some() => return Err(extra_root(at)),
        None => *root = Some(node),
    }
    Ok(())
}

/// Keeps text only while the open element has not seen a child element yet.
fn push_text(stack: &mut [OpenElement], text: &str, at: Span) -> Result<()> {
    match stack.last_mut() {
        Some(open) if !open.seen_child => open.text.push_str(text),
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None => return Err(malformed("text outside the root element", at)),
    }
    Ok(())
}

/// The markup token starting at `start`, up to and including its closing `>`.
fn token_at(source: &str, start: usize) -> Span {
    let end = source
        .get(start..)
        .and_then(|rest| rest.find('>'))
        .map_or(source.len(), |i| start + i + 1);
    Span::new(start..end)
}

const WELL_FORMED_HELP: &str = "the input must be a well-formed .ghx (XML) document";

fn malformed(message: impl Into<String>, at: Span) -> Diagnostic {
    Diagnostic::error(message)
        .with_code(ErrorCode::E001)
        .with_label(at, "markup is not well-formed here")
        .with_help(WELL_FORMED_HELP)
}

fn extra_root(at: Span) -> Diagnostic {
    malformed("document has more than one root element", at)
}
