// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Unit tests for the YAML parser.
//!
//! These tests verify parsing behavior for the grammar's styles and
//! structures, directive handling, diagnostics and edge cases.

use super::*;

fn single_root(input: &str) -> Node {
    let stream = parse(input).unwrap_or_else(|e| panic!("parse of {input:?} failed: {e}"));
    assert_eq!(stream.len(), 1, "expected one document in {input:?}");
    stream.documents.into_iter().next().unwrap().root
}

fn scalar_of(node: &Node) -> (&str, ScalarStyle) {
    match &node.value {
        Value::Scalar { value, style } => (value.as_str(), *style),
        other => panic!("expected scalar, got {other:?}"),
    }
}

fn mapping_of(node: &Node) -> &[(Node, Node)] {
    match &node.value {
        Value::Mapping { entries, .. } => entries,
        other => panic!("expected mapping, got {other:?}"),
    }
}

fn sequence_of(node: &Node) -> &[Node] {
    match &node.value {
        Value::Sequence { items, .. } => items,
        other => panic!("expected sequence, got {other:?}"),
    }
}

#[test]
fn test_empty_input() {
    let stream = parse("").unwrap();
    assert!(stream.is_empty());
}

#[test]
fn test_comments_only() {
    let stream = parse("# a comment\n\n   # another\n").unwrap();
    assert!(stream.is_empty());
}

#[test]
fn test_bom_and_comments_only() {
    let stream = parse("\u{FEFF}# nothing here\n").unwrap();
    assert!(stream.is_empty());
}

#[test]
fn test_simple_scalar() {
    let root = single_root("hello");
    assert_eq!(scalar_of(&root), ("hello", ScalarStyle::Plain));
}

#[test]
fn test_simple_mapping() {
    let root = single_root("key: value\n");
    let entries = mapping_of(&root);
    assert_eq!(entries.len(), 1);
    assert_eq!(scalar_of(&entries[0].0), ("key", ScalarStyle::Plain));
    assert_eq!(scalar_of(&entries[0].1), ("value", ScalarStyle::Plain));
}

#[test]
fn test_simple_sequence() {
    let root = single_root("- a\n- b\n- c\n");
    let items = sequence_of(&root);
    assert_eq!(items.len(), 3);
    assert_eq!(scalar_of(&items[0]).0, "a");
    assert_eq!(scalar_of(&items[1]).0, "b");
    assert_eq!(scalar_of(&items[2]).0, "c");
}

#[test]
fn test_document_kind() {
    let stream = parse("bare\n").unwrap();
    assert_eq!(stream.documents[0].kind, DocumentKind::Bare);
    let stream = parse("---\nexplicit\n").unwrap();
    assert_eq!(stream.documents[0].kind, DocumentKind::Explicit);
    let stream = parse("%YAML 1.2\n---\ndirective\n").unwrap();
    assert_eq!(stream.documents[0].kind, DocumentKind::Directive);
}

#[test]
fn test_nested_structure() {
    let root = single_root("name: John\naddress:\n  street: 123 Main St\n  city: Springfield\n");
    let entries = mapping_of(&root);
    assert_eq!(entries.len(), 2);
    let address = mapping_of(&entries[1].1);
    assert_eq!(address.len(), 2);
    assert_eq!(scalar_of(&address[0].1).0, "123 Main St");
}

#[test]
fn test_sequence_under_mapping_at_same_indent() {
    let root = single_root("key:\n- a\n- b\n");
    let entries = mapping_of(&root);
    let items = sequence_of(&entries[0].1);
    assert_eq!(items.len(), 2);
}

#[test]
fn test_order_preservation() {
    let root = single_root("c: 1\na: 2\nb: 3\n");
    let keys: Vec<&str> = mapping_of(&root)
        .iter()
        .map(|(k, _)| scalar_of(k).0)
        .collect();
    assert_eq!(keys, ["c", "a", "b"]);
}

#[test]
fn test_collection_styles() {
    let root = single_root("- [1, 2]\n- {a: b}\n");
    let items = sequence_of(&root);
    assert!(matches!(
        &root.value,
        Value::Sequence {
            style: CollectionStyle::Block,
            ..
        }
    ));
    assert!(matches!(
        &items[0].value,
        Value::Sequence {
            style: CollectionStyle::Flow,
            ..
        }
    ));
    assert!(matches!(
        &items[1].value,
        Value::Mapping {
            style: CollectionStyle::Flow,
            ..
        }
    ));
}

#[test]
fn test_flow_sequence_with_nested_mapping() {
    let root = single_root("[ one, two, { three: four } ]\n");
    let items = sequence_of(&root);
    assert_eq!(items.len(), 3);
    assert_eq!(scalar_of(&items[0]).0, "one");
    assert_eq!(scalar_of(&items[1]).0, "two");
    let inner = mapping_of(&items[2]);
    assert_eq!(scalar_of(&inner[0].0).0, "three");
    assert_eq!(scalar_of(&inner[0].1).0, "four");
}

#[test]
fn test_flow_mapping_entry_forms() {
    let root = single_root("{a: 1, 'b': 2, : 3, d}\n");
    let entries = mapping_of(&root);
    assert_eq!(entries.len(), 4);
    assert_eq!(scalar_of(&entries[0].0).0, "a");
    assert_eq!(scalar_of(&entries[1].0), ("b", ScalarStyle::SingleQuoted));
    assert!(entries[2].0.value.is_empty_node());
    assert_eq!(scalar_of(&entries[2].1).0, "3");
    assert_eq!(scalar_of(&entries[3].0).0, "d");
    assert!(entries[3].1.value.is_empty_node());
}

#[test]
fn test_flow_pair_in_sequence() {
    let root = single_root("[a: b, c]\n");
    let items = sequence_of(&root);
    assert_eq!(items.len(), 2);
    let pair = mapping_of(&items[0]);
    assert_eq!(pair.len(), 1);
    assert_eq!(scalar_of(&pair[0].0).0, "a");
    assert_eq!(scalar_of(&pair[0].1).0, "b");
    assert_eq!(scalar_of(&items[1]).0, "c");
}

#[test]
fn test_flow_explicit_pair_in_sequence() {
    let root = single_root("[? a : b]\n");
    let items = sequence_of(&root);
    let pair = mapping_of(&items[0]);
    assert_eq!(scalar_of(&pair[0].0).0, "a");
    assert_eq!(scalar_of(&pair[0].1).0, "b");
}

#[test]
fn test_flow_adjacent_value() {
    let root = single_root("{\"a\":1}\n");
    let entries = mapping_of(&root);
    assert_eq!(scalar_of(&entries[0].0), ("a", ScalarStyle::DoubleQuoted));
    assert_eq!(scalar_of(&entries[0].1).0, "1");
}

#[test]
fn test_flow_trailing_comma() {
    let root = single_root("[a, b,]\n");
    assert_eq!(sequence_of(&root).len(), 2);
    let root = single_root("{a: 1,}\n");
    assert_eq!(mapping_of(&root).len(), 1);
}

#[test]
fn test_empty_flow_collections() {
    let root = single_root("[]\n");
    assert!(sequence_of(&root).is_empty());
    let root = single_root("{}\n");
    assert!(mapping_of(&root).is_empty());
}

#[test]
fn test_plain_multiline_folding() {
    let root = single_root("a\n b\n\n c\n");
    assert_eq!(scalar_of(&root), ("a b\nc", ScalarStyle::Plain));
}

#[test]
fn test_plain_scalar_with_colon_inside() {
    let root = single_root("a:b\n");
    assert_eq!(scalar_of(&root).0, "a:b");
}

#[test]
fn test_single_quoted() {
    let root = single_root("'it''s'\n");
    assert_eq!(scalar_of(&root), ("it's", ScalarStyle::SingleQuoted));
}

#[test]
fn test_single_quoted_multiline() {
    let root = single_root("'a\n b'\n");
    assert_eq!(scalar_of(&root).0, "a b");
}

#[test]
fn test_double_quoted_escapes() {
    let root = single_root("\"fun \\n with \\x41\"\n");
    assert_eq!(scalar_of(&root), ("fun \n with A", ScalarStyle::DoubleQuoted));
}

#[test]
fn test_double_quoted_unicode_escapes() {
    let root = single_root("\"\\u0041\\U0001F600\\t\\\\\"\n");
    assert_eq!(scalar_of(&root).0, "A\u{1F600}\t\\");
}

#[test]
fn test_double_quoted_multiline_folding() {
    let root = single_root("\"a\n b\"\n");
    assert_eq!(scalar_of(&root).0, "a b");
}

#[test]
fn test_double_quoted_escaped_break() {
    // An escaped break joins lines without a space.
    let root = single_root("\"a\\\n  b\"\n");
    assert_eq!(scalar_of(&root).0, "ab");
}

#[test]
fn test_invalid_escape_letter() {
    let err = parse("\"\\q\"\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidEscape('q'));
}

#[test]
fn test_bad_hex_escape_length() {
    let err = parse("\"\\x4\"\n").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::BadHexEscape {
            escape: 'x',
            expected: 2,
        }
    );
    let err = parse("\"\\u12\"\n").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::BadHexEscape {
            escape: 'u',
            expected: 4,
        }
    );
}

#[test]
fn test_escape_out_of_range() {
    let err = parse("\"\\uD800\"\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::EscapeOutOfRange(0xD800));
}

#[test]
fn test_unterminated_double_quoted() {
    let err = parse("key: \"unterminated\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedScalar);
}

#[test]
fn test_literal_block_scalar() {
    let root = single_root("foo: |\n  bar\n  baz\n");
    let entries = mapping_of(&root);
    assert_eq!(
        scalar_of(&entries[0].1),
        ("bar\nbaz\n", ScalarStyle::Literal)
    );
}

#[test]
fn test_literal_chomping_indicators() {
    let root = single_root("a: |-\n  x\n\nb: |+\n  y\n\nc: |\n  z\n");
    let entries = mapping_of(&root);
    assert_eq!(scalar_of(&entries[0].1).0, "x");
    assert_eq!(scalar_of(&entries[1].1).0, "y\n\n");
    assert_eq!(scalar_of(&entries[2].1).0, "z\n");
}

#[test]
fn test_literal_preserves_interior_blanks() {
    let root = single_root("|\n a\n\n b\n");
    assert_eq!(scalar_of(&root), ("a\n\nb\n", ScalarStyle::Literal));
}

#[test]
fn test_folded_block_scalar() {
    let root = single_root(">\n folded\n line\n");
    assert_eq!(scalar_of(&root), ("folded line\n", ScalarStyle::Folded));
}

#[test]
fn test_folded_more_indented_lines_not_folded() {
    let root = single_root(">\n one\n two\n\n  more\n three\n");
    assert_eq!(scalar_of(&root).0, "one two\n\n more\nthree\n");
}

#[test]
fn test_block_scalar_explicit_indent() {
    let root = single_root("k: |2\n  x\n   y\n");
    let entries = mapping_of(&root);
    assert_eq!(scalar_of(&entries[0].1).0, "x\n y\n");
}

#[test]
fn test_block_scalar_header_comment() {
    let root = single_root("| # note\n x\n");
    assert_eq!(scalar_of(&root).0, "x\n");
}

#[test]
fn test_block_scalar_zero_indicator_errors() {
    let err = parse("|0\n x\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ZeroIndentationIndicator);
}

#[test]
fn test_block_scalar_junk_header_errors() {
    let err = parse("| junk\n x\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidBlockScalarHeader);
}

#[test]
fn test_block_scalar_leading_empty_too_deep_errors() {
    let err = parse("|\n    \n x\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::LeadingEmptyLineTooDeep);
}

#[test]
fn test_block_scalar_under_indented_content_errors() {
    assert!(parse("k: |2\n  a\n x\n").is_err());
}

#[test]
fn test_crlf_breaks_normalize() {
    let root = single_root("a: |\r\n  x\r\n  y\r\n");
    let entries = mapping_of(&root);
    assert_eq!(scalar_of(&entries[0].1).0, "x\ny\n");
}

#[test]
fn test_explicit_mapping_entry() {
    let root = single_root("? key\n: value\n");
    let entries = mapping_of(&root);
    assert_eq!(entries.len(), 1);
    assert_eq!(scalar_of(&entries[0].0).0, "key");
    assert_eq!(scalar_of(&entries[0].1).0, "value");
}

#[test]
fn test_explicit_key_without_value() {
    let root = single_root("? lonely\n");
    let entries = mapping_of(&root);
    assert_eq!(scalar_of(&entries[0].0).0, "lonely");
    assert!(entries[0].1.value.is_empty_node());
}

#[test]
fn test_empty_key_entry() {
    let root = single_root(": v\n");
    let entries = mapping_of(&root);
    assert!(entries[0].0.value.is_empty_node());
    assert_eq!(scalar_of(&entries[0].1).0, "v");
}

#[test]
fn test_empty_sequence_entry() {
    let root = single_root("-\n- b\n");
    let items = sequence_of(&root);
    assert_eq!(items.len(), 2);
    assert!(items[0].value.is_empty_node());
    assert_eq!(scalar_of(&items[1]).0, "b");
}

#[test]
fn test_empty_mapping_value_at_same_level() {
    let root = single_root("a:\nb: 1\n");
    let entries = mapping_of(&root);
    assert_eq!(entries.len(), 2);
    assert!(entries[0].1.value.is_empty_node());
    assert_eq!(scalar_of(&entries[1].1).0, "1");
}

#[test]
fn test_compact_nested_sequence() {
    let root = single_root("- - a\n  - b\n");
    let items = sequence_of(&root);
    assert_eq!(items.len(), 1);
    let inner = sequence_of(&items[0]);
    assert_eq!(inner.len(), 2);
}

#[test]
fn test_compact_mapping_in_sequence() {
    let root = single_root("- a: 1\n  b: 2\n");
    let items = sequence_of(&root);
    assert_eq!(items.len(), 1);
    let inner = mapping_of(&items[0]);
    assert_eq!(inner.len(), 2);
}

#[test]
fn test_quoted_implicit_key() {
    let root = single_root("\"a b\": 1\n");
    let entries = mapping_of(&root);
    assert_eq!(scalar_of(&entries[0].0), ("a b", ScalarStyle::DoubleQuoted));
}

#[test]
fn test_flow_collection_as_key() {
    let root = single_root("[a, b]: value\n");
    let entries = mapping_of(&root);
    assert_eq!(sequence_of(&entries[0].0).len(), 2);
    assert_eq!(scalar_of(&entries[0].1).0, "value");
}

#[test]
fn test_anchor_and_alias() {
    let root = single_root("a: &x 1\nb: *x\n");
    let entries = mapping_of(&root);
    assert_eq!(entries[0].1.anchor.as_deref(), Some("x"));
    assert!(matches!(&entries[1].1.value, Value::Alias(name) if name == "x"));
}

#[test]
fn test_anchored_collection() {
    let root = single_root("&seq\n- a\n");
    assert_eq!(root.anchor.as_deref(), Some("seq"));
    assert_eq!(sequence_of(&root).len(), 1);
}

#[test]
fn test_alias_before_anchor_errors() {
    let err = parse("*nope\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedAlias("nope".to_owned()));
}

#[test]
fn test_properties_on_alias_errors() {
    let err = parse("&a *b\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::PropertiesOnAlias);
}

#[test]
fn test_secondary_tag_shorthand() {
    let root = single_root("!!str value\n");
    assert_eq!(
        root.tag,
        Some(Tag::Shorthand {
            handle: "!!".to_owned(),
            suffix: "str".to_owned(),
        })
    );
}

#[test]
fn test_primary_tag_shorthand() {
    let root = single_root("!local value\n");
    assert_eq!(
        root.tag,
        Some(Tag::Shorthand {
            handle: "!".to_owned(),
            suffix: "local".to_owned(),
        })
    );
}

#[test]
fn test_non_specific_tag() {
    let root = single_root("! value\n");
    assert_eq!(root.tag, Some(Tag::NonSpecific));
}

#[test]
fn test_verbatim_tag() {
    let root = single_root("!<tag:yaml.org,2002:str> value\n");
    assert_eq!(root.tag, Some(Tag::Verbatim("tag:yaml.org,2002:str".to_owned())));
}

#[test]
fn test_bare_verbatim_tag_errors() {
    let err = parse("!<!> value\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTag);
}

#[test]
fn test_tag_on_empty_node() {
    let root = single_root("!!str\n");
    assert!(root.value.is_empty_node());
    assert!(root.has_tag());
}

#[test]
fn test_undefined_tag_handle_errors() {
    let err = parse("!e!foo bar\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedTagHandle("!e!".to_owned()));
}

#[test]
fn test_tag_directive_declares_handle() {
    let stream = parse("%TAG !e! tag:example.com,2000:app/\n---\n!e!foo bar\n").unwrap();
    let doc = &stream.documents[0];
    assert_eq!(
        doc.directives[0].0,
        Directive::Tag {
            handle: "!e!".to_owned(),
            prefix: "tag:example.com,2000:app/".to_owned(),
        }
    );
    assert_eq!(
        doc.root.tag,
        Some(Tag::Shorthand {
            handle: "!e!".to_owned(),
            suffix: "foo".to_owned(),
        })
    );
}

#[test]
fn test_tag_handles_reset_per_document() {
    let input = "%TAG !e! tag:example.com,2000:\n---\n!e!a x\n...\n!e!b y\n";
    let err = parse(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedTagHandle("!e!".to_owned()));
    assert_eq!(err.document_index, 1);
}

#[test]
fn test_yaml_directive_recorded() {
    let stream = parse("%YAML 1.2\n---\nx\n").unwrap();
    let doc = &stream.documents[0];
    assert_eq!(doc.directives.len(), 1);
    assert_eq!(doc.directives[0].0, Directive::Yaml { major: 1, minor: 2 });
    assert!(doc.warnings.is_empty());
}

#[test]
fn test_future_yaml_version_warns_but_parses() {
    let stream = parse("%YAML 1.3\n---\nx\n").unwrap();
    let doc = &stream.documents[0];
    // The declared version is preserved, not downgraded.
    assert_eq!(doc.directives[0].0, Directive::Yaml { major: 1, minor: 3 });
    assert_eq!(doc.warnings.len(), 1);
    assert_eq!(
        doc.warnings[0].kind,
        WarningKind::UnsupportedVersion { major: 1, minor: 3 }
    );
}

#[test]
fn test_duplicate_yaml_directive_errors() {
    let err = parse("%YAML 1.2\n%YAML 1.2\n---\nx\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateYamlDirective);
}

#[test]
fn test_reserved_directive_warns() {
    let stream = parse("%FOO bar baz\n---\nx\n").unwrap();
    let doc = &stream.documents[0];
    assert_eq!(
        doc.directives[0].0,
        Directive::Reserved {
            name: "FOO".to_owned(),
            params: vec!["bar".to_owned(), "baz".to_owned()],
        }
    );
    assert_eq!(
        doc.warnings[0].kind,
        WarningKind::ReservedDirective("FOO".to_owned())
    );
}

#[test]
fn test_duplicate_tag_handle_warns_and_last_wins() {
    let input =
        "%TAG !e! tag:one.example,2000:\n%TAG !e! tag:two.example,2000:\n---\n!e!t v\n";
    let stream = parse(input).unwrap();
    let doc = &stream.documents[0];
    assert_eq!(
        doc.warnings[0].kind,
        WarningKind::DuplicateTagHandle("!e!".to_owned())
    );
    // Resolution against the second prefix must have succeeded.
    assert_eq!(doc.directives.len(), 2);
}

#[test]
fn test_directives_without_document_start_errors() {
    let err = parse("%YAML 1.2\nx\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExpectedDocumentStart);
}

#[test]
fn test_invalid_yaml_directive_errors() {
    assert_eq!(
        parse("%YAML 1\n---\nx\n").unwrap_err().kind,
        ErrorKind::InvalidDirective
    );
    assert_eq!(
        parse("%YAML 1.2 extra\n---\nx\n").unwrap_err().kind,
        ErrorKind::InvalidDirective
    );
}

#[test]
fn test_directive_after_unterminated_document_errors() {
    let err = parse("a: 1\n%YAML 1.2\n---\nb\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingDocumentEnd);
    assert_eq!(err.document_index, 0);
}

#[test]
fn test_multiple_documents() {
    let stream = parse("---\na\n---\nb\n").unwrap();
    assert_eq!(stream.len(), 2);
    assert_eq!(scalar_of(&stream.documents[0].root).0, "a");
    assert_eq!(scalar_of(&stream.documents[1].root).0, "b");
}

#[test]
fn test_document_suffix_then_bare_document() {
    let stream = parse("a: 1\n...\nb: 2\n").unwrap();
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.documents[1].kind, DocumentKind::Bare);
}

#[test]
fn test_bare_document_after_unterminated_errors() {
    // Without `...`, a following document must begin with `---`.
    let err = parse("--- a\nb: c\n").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TrailingContent | ErrorKind::ExpectedDocumentStart
    ));
}

#[test]
fn test_empty_explicit_document() {
    let stream = parse("---\n").unwrap();
    assert!(stream.documents[0].root.value.is_empty_node());
}

#[test]
fn test_back_to_back_empty_documents() {
    let stream = parse("---\n---\n").unwrap();
    assert_eq!(stream.len(), 2);
    assert!(stream.documents[0].root.value.is_empty_node());
}

#[test]
fn test_suffix_only_stream() {
    let stream = parse("...\n").unwrap();
    assert!(stream.is_empty());
}

#[test]
fn test_alias_across_documents() {
    let stream = parse("&a one\n...\n*a\n").unwrap();
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.documents[0].root.anchor.as_deref(), Some("a"));
    assert_eq!(scalar_of(&stream.documents[0].root).0, "one");
    assert!(matches!(&stream.documents[1].root.value, Value::Alias(name) if name == "a"));
}

#[test]
fn test_error_aborts_whole_stream() {
    let err = parse("ok: 1\n...\n[a\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnclosedFlowCollection);
    assert_eq!(err.document_index, 1);
}

#[test]
fn test_tab_as_indentation_errors() {
    let err = parse("a:\n\tb: c\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TabInIndentation);
}

#[test]
fn test_tab_as_separation_is_allowed() {
    let root = single_root("-\ta\n");
    let items = sequence_of(&root);
    assert_eq!(scalar_of(&items[0]).0, "a");
}

#[test]
fn test_implicit_key_too_long_errors() {
    let input = format!("{}: v\n", "x".repeat(1025));
    let err = parse(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::KeyTooLong);
}

#[test]
fn test_implicit_key_at_limit_parses() {
    let input = format!("{}: v\n", "x".repeat(1024));
    assert!(parse(&input).is_ok());
}

#[test]
fn test_multiline_quoted_key_errors() {
    let err = parse("\"c\n d\": 1\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TrailingContent);
}

#[test]
fn test_mapping_value_indicator_in_flow_scalar_errors() {
    assert!(parse("[a: b: c]\n").is_err());
}

#[test]
fn test_missing_separator_in_flow_errors() {
    let err = parse("['a' 'b']\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingSeparator);
}

#[test]
fn test_unclosed_flow_collection_errors() {
    let err = parse("[a, b\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnclosedFlowCollection);
}

#[test]
fn test_document_marker_in_flow_errors() {
    let err = parse("[a,\n---\n]\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DocumentMarkerInFlow);
}

#[test]
fn test_multiline_plain_value() {
    // A plain mapping value may continue on more-indented lines.
    let root = single_root("a: b\n  continued\n");
    let entries = mapping_of(&root);
    assert_eq!(scalar_of(&entries[0].1).0, "b continued");
}

#[test]
fn test_trailing_content_errors() {
    let err = parse("a: b\n  c: d\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TrailingContent);
}

#[test]
fn test_spans_track_positions() {
    let root = single_root("key: value\n");
    let entries = mapping_of(&root);
    let (key, value) = &entries[0];
    assert_eq!(key.span.start.offset, 0);
    assert_eq!(key.span.end.offset, 3);
    assert_eq!(value.span.start.offset, 5);
    assert_eq!(value.span.end.offset, 10);
    assert_eq!(root.span.start.offset, 0);
    assert_eq!(root.span.end.offset, 10);
}

#[test]
fn test_error_position_is_precise() {
    let err = parse("a: \"x\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedScalar);
    // The scalar starts at line 1, column 4.
    assert_eq!(err.span.start.line, 0);
    assert_eq!(err.span.start.column, 3);
}

#[test]
fn test_comment_between_entries() {
    let root = single_root("a: 1\n# note\nb: 2\n");
    assert_eq!(mapping_of(&root).len(), 2);
}

#[test]
fn test_trailing_comment_after_value() {
    let root = single_root("a: 1 # note\n");
    assert_eq!(scalar_of(&mapping_of(&root)[0].1).0, "1");
}
