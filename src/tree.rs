// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! The token tree produced by parsing.
//!
//! This module implements a serialization-level view of a YAML stream:
//! scalar styles, block/flow structure, directives, anchors, aliases and
//! tags are all preserved. Node properties (anchor, tag) are separate from
//! node content — in YAML they are properties that can be attached to any
//! node, not node types of their own.
//!
//! Scalar values are owned strings normalized per the folding, chomping and
//! escape rules; the tree never borrows from the input buffer, so the
//! caller is free to drop the source once parsing returns. Aliases are
//! plain name references: the tree is acyclic and resolution is left to a
//! downstream composer.

use derive_more::Display;

use crate::error::Warning;
use crate::span::{Span, Spanned};

/// A parsed YAML stream: an ordered sequence of documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    /// The documents of the stream, in source order.
    pub documents: Vec<Document>,
}

impl Stream {
    /// The number of documents in the stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the stream contains no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over the documents of the stream.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }
}

impl IntoIterator for Stream {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stream {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// How a document was introduced in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DocumentKind {
    /// No directives and no `---` marker.
    #[display("bare")]
    Bare,
    /// Introduced by a `---` marker, without directives.
    #[display("explicit")]
    Explicit,
    /// One or more directives followed by `---`.
    #[display("directive")]
    Directive,
}

/// A single document in a YAML stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// How the document was introduced.
    pub kind: DocumentKind,
    /// The directives preceding the document, in source order.
    pub directives: Vec<Spanned<Directive>>,
    /// The top-level node of the document.
    pub root: Node,
    /// Non-fatal diagnostics produced while parsing this document.
    pub warnings: Vec<Warning>,
}

/// A directive found in a document's prologue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `%YAML major.minor`
    ///
    /// The declared version is preserved verbatim, even when it is newer
    /// than 1.2 (the parser warns and proceeds as 1.2).
    Yaml {
        /// Declared major version.
        major: u32,
        /// Declared minor version.
        minor: u32,
    },
    /// `%TAG handle prefix`
    Tag {
        /// The handle being bound (`!`, `!!` or `!name!`).
        handle: String,
        /// The prefix the handle expands to (a local `!…` prefix or a
        /// global URI prefix).
        prefix: String,
    },
    /// Any other directive, preserved with its parameters.
    Reserved {
        /// The directive name (without the leading `%`).
        name: String,
        /// The space-separated parameters.
        params: Vec<String>,
    },
}

/// A YAML node with optional properties (anchor, tag) and a value.
///
/// For example, in `&anchor key: value` the anchor attaches to the scalar
/// `key`, which is then used as a mapping key.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Optional anchor name (from `&name`).
    pub anchor: Option<String>,
    /// Optional tag property.
    pub tag: Option<Tag>,
    /// The node's value.
    pub value: Value,
    /// Source span covering the entire node (including properties).
    pub span: Span,
}

impl Node {
    /// Create a new node with just a value and span (no properties).
    #[must_use]
    pub const fn new(value: Value, span: Span) -> Self {
        Self {
            anchor: None,
            tag: None,
            value,
            span,
        }
    }

    /// Attach an anchor to this node.
    #[must_use]
    pub fn with_anchor(mut self, anchor: String) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Attach a tag to this node.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Create an empty node at a position.
    #[must_use]
    pub const fn empty(span: Span) -> Self {
        Self::new(Value::Empty, span)
    }

    /// Returns `true` if this node has an anchor.
    #[must_use]
    pub const fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns `true` if this node has a tag.
    #[must_use]
    pub const fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    /// The scalar string value, if this node is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            Value::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// A tag property on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// A verbatim tag: `!<uri>`.
    Verbatim(String),
    /// A shorthand tag: handle plus suffix, e.g. `!!str` or `!e!local`.
    ///
    /// The suffix is stored as written (percent-escapes not decoded);
    /// expansion against the document's handle table is left to the
    /// downstream resolver.
    Shorthand {
        /// The handle (`!`, `!!` or `!name!`).
        handle: String,
        /// The suffix following the handle.
        suffix: String,
    },
    /// The non-specific tag `!`.
    NonSpecific,
}

impl Tag {
    /// The canonical form of a verbatim global tag's URI, for comparison.
    ///
    /// Percent escapes are decoded and re-encoded so that equivalent
    /// spellings (`%2C` vs `,`) compare equal. Returns `None` for local,
    /// shorthand and non-specific tags, which are resolved downstream.
    #[must_use]
    pub fn canonical_uri(&self) -> Option<String> {
        match self {
            Self::Verbatim(uri) if !uri.starts_with('!') => {
                crate::uri::percent_decode(uri).map(|decoded| crate::uri::percent_encode(&decoded))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verbatim(uri) => write!(f, "!<{uri}>"),
            Self::Shorthand { handle, suffix } => write!(f, "{handle}{suffix}"),
            Self::NonSpecific => write!(f, "!"),
        }
    }
}

/// The presentation style of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScalarStyle {
    /// An unquoted scalar.
    #[display("plain")]
    Plain,
    /// A `'…'` scalar.
    #[display("single-quoted")]
    SingleQuoted,
    /// A `"…"` scalar.
    #[display("double-quoted")]
    DoubleQuoted,
    /// A `|` block scalar.
    #[display("literal")]
    Literal,
    /// A `>` block scalar.
    #[display("folded")]
    Folded,
}

/// The presentation style of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CollectionStyle {
    /// Indentation-based syntax.
    #[display("block")]
    Block,
    /// Bracketed `[…]` / `{…}` syntax.
    #[display("flow")]
    Flow,
}

/// The content of a YAML node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A scalar with its normalized string content and source style.
    ///
    /// Every interior line break is a single `U+000A`; folding, chomping
    /// and escape decoding have already been applied.
    Scalar {
        /// The normalized content.
        value: String,
        /// The style the scalar was written in.
        style: ScalarStyle,
    },

    /// A sequence of nodes, in source order.
    Sequence {
        /// Block or flow presentation.
        style: CollectionStyle,
        /// The sequence entries.
        items: Vec<Node>,
    },

    /// A mapping of key nodes to value nodes, in source order.
    ///
    /// Keys may be any node, including collections.
    Mapping {
        /// Block or flow presentation.
        style: CollectionStyle,
        /// The mapping entries.
        entries: Vec<(Node, Node)>,
    },

    /// An alias reference (`*name`).
    ///
    /// Aliases never carry their own anchor or tag properties.
    Alias(String),

    /// An empty node, produced where the grammar allows an omitted node.
    ///
    /// Unlike an alias, an empty node may carry properties.
    Empty,
}

impl Value {
    /// Create a scalar value.
    #[must_use]
    pub fn scalar(value: impl Into<String>, style: ScalarStyle) -> Self {
        Self::Scalar {
            value: value.into(),
            style,
        }
    }

    /// Returns `true` if this is a scalar.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    /// Returns `true` if this is a collection (sequence or mapping).
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Sequence { .. } | Self::Mapping { .. })
    }

    /// Returns `true` if this is an alias.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }

    /// Returns `true` if this is an empty node.
    #[must_use]
    pub const fn is_empty_node(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn test_value_predicates() {
        assert!(Value::scalar("x", ScalarStyle::Plain).is_scalar());
        assert!(Value::Sequence {
            style: CollectionStyle::Flow,
            items: vec![],
        }
        .is_collection());
        assert!(Value::Mapping {
            style: CollectionStyle::Block,
            entries: vec![],
        }
        .is_collection());
        assert!(Value::Alias("a".to_owned()).is_alias());
        assert!(Value::Empty.is_empty_node());
        assert!(!Value::Empty.is_scalar());
    }

    #[test]
    fn test_node_construction() {
        let span = Span::default();

        let node = Node::new(Value::scalar("test", ScalarStyle::Plain), span);
        assert!(!node.has_anchor());
        assert!(!node.has_tag());
        assert_eq!(node.as_scalar(), Some("test"));

        let node = Node::new(Value::scalar("test", ScalarStyle::Plain), span)
            .with_anchor("myanchor".to_owned());
        assert_eq!(node.anchor.as_deref(), Some("myanchor"));

        let node = Node::new(Value::Empty, span).with_tag(Tag::NonSpecific);
        assert!(node.has_tag());
        assert_eq!(node.as_scalar(), None);

        assert!(Node::empty(span).value.is_empty_node());
    }

    #[test]
    fn test_tag_canonical_uri() {
        let tag = Tag::Verbatim("tag:example.com,2000:app/caf\u{E9}".to_owned());
        assert_eq!(
            tag.canonical_uri().as_deref(),
            Some("tag:example.com,2000:app/caf%C3%A9")
        );
        assert_eq!(Tag::Verbatim("!local".to_owned()).canonical_uri(), None);
        assert_eq!(Tag::NonSpecific.canonical_uri(), None);
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag::Verbatim("tag:yaml.org,2002:str".to_owned()).to_string(), "!<tag:yaml.org,2002:str>");
        assert_eq!(
            Tag::Shorthand {
                handle: "!!".to_owned(),
                suffix: "str".to_owned(),
            }
            .to_string(),
            "!!str"
        );
        assert_eq!(Tag::NonSpecific.to_string(), "!");
    }

    #[test]
    fn test_stream_iteration() {
        let stream = Stream::default();
        assert!(stream.is_empty());
        assert_eq!(stream.len(), 0);
        assert_eq!(stream.iter().count(), 0);
    }
}
