//! End-to-end round-trip tests across all four structural formats
//!
//! Exercises the complete flow: parse -> edit -> serialize -> reparse,
//! with comment capture along the way.

use modcfg_content::{handler_for, ConfigValue, Document, Format};
use modcfg_edit::{apply, filter_tree, EditOp};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(Format::Json, "{\n  \"enabled\": true,\n  \"limits\": {\"max\": 20}\n}")]
#[case(Format::Toml, "enabled = true\n\n[limits]\nmax = 20\n")]
#[case(Format::Yaml, "enabled: true\nlimits:\n  max: 20\n")]
#[case(Format::Properties, "enabled=true\nmax=20\n")]
fn parse_serialize_parse_is_stable(#[case] format: Format, #[case] source: &str) {
    let handler = handler_for(format).unwrap();
    let once = handler.parse(source).unwrap();
    let text = handler.serialize(&once.root).unwrap();
    let twice = handler.parse(&text).unwrap();
    assert_eq!(once.root, twice.root, "unstable round trip for {format}");
}

#[test]
fn toml_comment_attachment() {
    let doc = Document::parse_as("# hello\nkey = 1", Format::Toml).unwrap();
    assert_eq!(doc.comment("key"), Some("hello"));
}

#[test]
fn end_to_end_toml_edit_cycle() {
    let source = "[server]\n# max players allowed\nmax-players = 20\n";
    let mut doc = Document::parse_as(source, Format::Toml).unwrap();

    assert_eq!(doc.get_path("server.max-players"), Some(&ConfigValue::Number(20.0)));
    assert_eq!(doc.comment("server.max-players"), Some("max players allowed"));

    let edited = apply(
        doc.root().clone(),
        "server.max-players",
        EditOp::Set(ConfigValue::Number(32.0)),
    )
    .unwrap();
    doc.replace_root(edited);

    assert_eq!(doc.serialize().unwrap(), "\n[server]\nmax-players = 32\n");
}

#[test]
fn yaml_boolean_coercion_end_to_end() {
    let source = "a: yes\nb: true\nc: on\nd: no\ne: false\nf: off\n";
    let doc = Document::parse_as(source, Format::Yaml).unwrap();
    for key in ["a", "b", "c"] {
        assert_eq!(doc.get_path(key), Some(&ConfigValue::Bool(true)), "key {key}");
    }
    for key in ["d", "e", "f"] {
        assert_eq!(doc.get_path(key), Some(&ConfigValue::Bool(false)), "key {key}");
    }
}

#[test]
fn array_add_item_default() {
    let doc = Document::parse_as("{\"flags\": [true, false]}", Format::Json).unwrap();
    let edited = apply(doc.root().clone(), "flags", EditOp::ArrayPush).unwrap();
    assert_eq!(
        edited.get("flags"),
        Some(&ConfigValue::Array(vec![
            ConfigValue::Bool(true),
            ConfigValue::Bool(false),
            ConfigValue::Bool(false),
        ]))
    );
}

#[test]
fn filter_keeps_matching_branch() {
    let doc = Document::parse_as("{\"a\": {\"b\": 1, \"c\": 2}, \"d\": 3}", Format::Json).unwrap();
    let filtered = filter_tree(doc.root(), "b").unwrap();
    let expected = Document::parse_as("{\"a\": {\"b\": 1}}", Format::Json).unwrap();
    assert_eq!(filtered, *expected.root());
}

#[test]
fn delete_then_readd_reproduces_tree() {
    let doc = Document::parse_as("pvp=true\nmax-players=20\n", Format::Properties).unwrap();
    let original = doc.root().clone();

    let removed = apply(original.clone(), "pvp", EditOp::Remove).unwrap();
    assert_eq!(removed.get("pvp"), None);

    let restored = apply(
        removed,
        "",
        EditOp::Insert {
            key: "pvp".to_string(),
            value: ConfigValue::Bool(true),
        },
    )
    .unwrap();
    assert_eq!(restored, original);
}

#[test]
fn cross_format_same_tree() {
    // The same logical config through three formats lands on the same tree
    let json = Document::parse_as("{\"server\": {\"max\": 20, \"name\": \"hub\"}}", Format::Json)
        .unwrap();
    let toml = Document::parse_as("[server]\nmax = 20\nname = \"hub\"\n", Format::Toml).unwrap();
    let yaml = Document::parse_as("server:\n  max: 20\n  name: hub\n", Format::Yaml).unwrap();
    assert_eq!(json.root(), toml.root());
    assert_eq!(toml.root(), yaml.root());
}
