//! End-to-end tests for `treehopper_parser::parse`.

use treehopper_parser::{
    ExtractConfig, Marker, OutputRule, build_tree, error::ErrorCode, find_all_by_key,
    find_markers, find_subtree_by_name, parse,
};

struct Object<'a> {
    guid: &'a str,
    name: &'a str,
    bounds: [&'a str; 4],
    extra: &'a str,
}

impl<'a> Object<'a> {
    fn new(guid: &'a str, name: &'a str) -> Self {
        Self {
            guid,
            name,
            bounds: ["0", "0", "100", "50"],
            extra: "",
        }
    }

    fn bounds(mut self, bounds: [&'a str; 4]) -> Self {
        self.bounds = bounds;
        self
    }

    fn extra(mut self, extra: &'a str) -> Self {
        self.extra = extra;
        self
    }

    fn markup(&self) -> String {
        let [x, y, w, h] = self.bounds;
        format!(
            r#"<chunk name="Object">
                 <items>
                   <item name="Bounds"><X>{x}</X><Y>{y}</Y><W>{w}</W><H>{h}</H></item>
                   <item name="InstanceGuid">{}</item>
                   <item name="Name">{}</item>
                   <item name="Pivot"><X>5.5</X><Y>7</Y></item>
                 </items>
                 {}
               </chunk>"#,
            self.guid, self.name, self.extra
        )
    }
}

fn document(objects: &[Object<'_>]) -> String {
    let body: String = objects.iter().map(Object::markup).collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Archive name="Root">
  <chunk name="Definition">
    <chunk name="DocumentHeader">
      <items><item name="DocumentID" type_name="gh_guid">doc-42</item></items>
    </chunk>
    <chunk name="DefinitionProperties">
      <items><item name="Name" type_name="gh_string">sample.ghx</item></items>
    </chunk>
    <chunk name="DefinitionObjects">
      <items><item name="ObjectCount" type_name="gh_int32">{}</item></items>
      <chunks count="{}">{body}</chunks>
    </chunk>
  </chunk>
</Archive>"#,
        objects.len(),
        objects.len()
    )
}

const ADD_EXTRA: &str = r#"
    <chunk name="InputParam"><items><item name="InstanceGuid">i1</item></items></chunk>
    <chunk name="OutputParam"><items><item name="InstanceGuid">o1</item></items></chunk>"#;

const MUL_EXTRA: &str = r#"
    <chunk name="Container"><items><item name="Source">o1</item></items></chunk>"#;

#[test]
fn test_two_component_definition() {
    let source = document(&[
        Object::new("a1", "Add").extra(ADD_EXTRA),
        Object::new("m1", "Mul")
            .bounds(["200", "0", "100", "50"])
            .extra(MUL_EXTRA),
    ]);

    let parsed = parse(&source, &ExtractConfig::default()).unwrap();
    let definition = parsed.definition();

    assert_eq!(definition.info().document_id(), Some("doc-42"));
    assert_eq!(definition.info().name(), Some("sample.ghx"));
    assert_eq!(definition.info().object_count(), Some(2));

    let [add, mul] = definition.components() else {
        panic!("expected two components");
    };
    assert_eq!(add.guid(), "a1");
    assert_eq!(add.output(), Some("o1"));
    assert_eq!(add.port_id(), "o1");
    assert_eq!(mul.inputs(), ["o1"]);
    assert_eq!(mul.output(), None);
    assert_eq!(mul.position(), (200, 0));
    assert!(mul.inputs().iter().any(|input| input == add.port_id()));
}

#[test]
fn test_definition_objects_subtree() {
    let source = document(&[Object::new("a1", "Add")]);
    let root = build_tree(&source).unwrap();

    let objects = find_subtree_by_name(&root, "chunk", "DefinitionObjects").unwrap();
    let tags: Vec<&str> = objects.iter().map(|child| child.tag()).collect();
    assert_eq!(tags, vec!["items", "chunks"]);

    assert!(find_subtree_by_name(&root, "chunk", "Nope").is_none());
}

#[test]
fn test_same_named_markers_found_in_order() {
    let root = build_tree(
        r#"<chunk name="Object">
             <item name="Source">first</item>
             <chunk><item name="Source">second</item></chunk>
           </chunk>"#,
    )
    .unwrap();

    let generic = find_all_by_key(&root, "name", "Source");
    let texts: Vec<_> = generic
        .iter()
        .filter_map(|found| found.payload().and_then(|payload| payload.text()))
        .collect();
    assert_eq!(texts, vec!["first", "second"]);

    let fast = find_markers(&root, &Marker::Source);
    assert_eq!(fast.len(), 2);
    assert_eq!(fast[1].text(), Some("second"));
}

#[test]
fn test_missing_value_is_none() {
    let source = document(&[Object::new("a1", "Add")]);
    let parsed = parse(&source, &ExtractConfig::default()).unwrap();
    assert_eq!(parsed.definition().components()[0].value(), None);
}

#[test]
fn test_value_is_read() {
    let source = document(&[Object::new("a1", "Slider")
        .extra(r#"<chunk name="Slider"><items><item name="Value">0.25</item></items></chunk>"#)]);
    let parsed = parse(&source, &ExtractConfig::default()).unwrap();
    assert_eq!(parsed.definition().components()[0].value(), Some("0.25"));
}

#[test]
fn test_missing_bounds_reports_object_index() {
    let mut source = document(&[Object::new("a1", "Add"), Object::new("b2", "Sub")]);
    // Rename the second object's Bounds so it can no longer be found.
    let second = source.rfind(r#"name="Bounds""#).unwrap();
    source.replace_range(second..second + r#"name="Bounds""#.len(), r#"name="Bnds""#);

    let err = parse(&source, &ExtractConfig::default()).unwrap_err();
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E200));
    assert!(diag.message().contains("#1"), "{}", diag.message());

    // The label points at the offending object.
    let span = diag.labels()[0].span();
    assert!(source[span.range()].contains("b2"));
}

#[test]
fn test_non_numeric_bounds() {
    let source = document(&[Object::new("a1", "Add").bounds(["0", "0", "wide", "50"])]);
    let err = parse(&source, &ExtractConfig::default()).unwrap_err();
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E300));
}

#[test]
fn test_duplicate_guid() {
    let source = document(&[Object::new("a1", "Add"), Object::new("a1", "Copy")]);
    let err = parse(&source, &ExtractConfig::default()).unwrap_err();
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E202));
    assert_eq!(diag.labels().len(), 2);
}

#[test]
fn test_missing_definition_objects() {
    let err = parse(
        r#"<Archive><chunk name="Definition"/></Archive>"#,
        &ExtractConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
}

#[test]
fn test_malformed_markup() {
    let err = parse("<Archive><chunk></Archive>", &ExtractConfig::default()).unwrap_err();
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E001));
    assert_eq!(diag.labels().len(), 1);
}

#[test]
fn test_empty_objects_chunk() {
    let source = document(&[]);
    let parsed = parse(&source, &ExtractConfig::default()).unwrap();
    assert!(parsed.definition().is_empty());
}

#[test]
fn test_output_rule_selection() {
    let extra = r#"<chunk name="OutputParam"><items><item name="InstanceGuid">o9</item></items></chunk>"#;
    let source = document(&[Object::new("a1", "Param").extra(extra)]);

    let strict = parse(&source, &ExtractConfig::default()).unwrap();
    assert_eq!(strict.definition().components()[0].output(), None);
    assert_eq!(strict.definition().components()[0].port_id(), "a1");

    let relaxed = parse(&source, &ExtractConfig::new(OutputRule::OutputParamOnly)).unwrap();
    assert_eq!(relaxed.definition().components()[0].output(), Some("o9"));
}

#[test]
fn test_parse_is_idempotent() {
    let source = document(&[
        Object::new("a1", "Add").extra(ADD_EXTRA),
        Object::new("m1", "Mul").extra(MUL_EXTRA),
    ]);
    let config = ExtractConfig::default();

    let first = parse(&source, &config).unwrap();
    let second = parse(&source, &config).unwrap();
    assert_eq!(first.definition(), second.definition());
    assert_eq!(first.tree(), second.tree());
}

#[test]
fn test_tree_round_trips_through_markup() {
    let source = document(&[Object::new("a1", "Add").extra(ADD_EXTRA)]);
    let parsed = parse(&source, &ExtractConfig::default()).unwrap();

    let rebuilt = build_tree(&parsed.tree().to_markup()).unwrap();
    assert_eq!(&rebuilt, parsed.tree());
}
