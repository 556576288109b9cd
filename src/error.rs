// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Error and warning types for YAML parsing.

use derive_more::Display;

use crate::span::Span;

/// An error encountered during YAML parsing.
///
/// Errors include their source span, enabling accurate error reporting with
/// line/column information, and the index of the document in the stream
/// that was being parsed when the error occurred.
///
/// Parsing aborts at the first hard error; documents that parsed before the
/// failing one are discarded along with the rest of the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// The span in the source where the error occurred.
    pub span: Span,
    /// The index of the document being parsed when the error occurred.
    pub document_index: usize,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ErrorKind {
    /// Unexpected end of input
    #[display("unexpected end of input")]
    UnexpectedEof,

    /// Invalid character that cannot start or continue a node
    #[display("invalid character")]
    InvalidCharacter,

    /// Non-printable character inside scalar content
    #[display("non-printable character in scalar content")]
    NonPrintableCharacter,

    /// Trailing content after a valid node
    /// e.g., `key: "value" extra content`
    #[display("unexpected content after node")]
    TrailingContent,

    /// Missing comma between flow collection elements
    /// e.g., `[a b]` instead of `[a, b]`
    #[display("missing separator (comma) in flow collection")]
    MissingSeparator,

    /// Missing colon after a mapping key
    /// e.g., `key\n  value` instead of `key:\n  value`
    #[display("missing colon after mapping key")]
    MissingColon,

    /// Flow collection left open at end of input
    /// e.g., `[a, b` with no closing `]`
    #[display("unclosed flow collection")]
    UnclosedFlowCollection,

    /// Document marker (`---` or `...`) inside a flow collection
    #[display("document marker not allowed in flow collection")]
    DocumentMarkerInFlow,

    /// Document marker (`---` or `...`) inside a quoted scalar
    #[display("document marker not allowed in quoted scalar")]
    DocumentMarkerInScalar,

    /// Unterminated quoted scalar
    #[display("unterminated quoted scalar")]
    UnterminatedScalar,

    /// Invalid escape sequence in a double-quoted scalar
    #[display("invalid escape sequence '\\{_0}'")]
    InvalidEscape(char),

    /// Hex escape with the wrong number of digits
    #[display("expected {expected} hexadecimal digits after '\\{escape}'")]
    BadHexEscape {
        /// The escape letter (`x`, `u` or `U`).
        escape: char,
        /// The number of digits that letter requires.
        expected: usize,
    },

    /// Hex escape naming a value that is not a Unicode scalar value
    #[display("escape does not name a valid Unicode character: {_0:#x}")]
    EscapeOutOfRange(u32),

    /// Invalid indentation
    #[display("invalid indentation")]
    InvalidIndentation,

    /// Invalid indentation with context
    #[display("invalid indentation: expected at least {expected} spaces, found {found}")]
    InvalidIndentationContext {
        /// The minimum number of spaces required here.
        expected: usize,
        /// The number of spaces actually found.
        found: usize,
    },

    /// Tab character in indentation (not allowed in YAML)
    #[display("tab character in indentation (use spaces)")]
    TabInIndentation,

    /// Invalid block scalar header
    #[display("invalid block scalar header")]
    InvalidBlockScalarHeader,

    /// Block scalar indentation indicator `0`
    #[display("block scalar indentation indicator must be 1-9")]
    ZeroIndentationIndicator,

    /// Leading empty line of a block scalar deeper than its detected indentation
    #[display("leading empty line is more indented than the block scalar content")]
    LeadingEmptyLineTooDeep,

    /// Implicit key longer than 1024 code points
    #[display("implicit key exceeds 1024 characters")]
    KeyTooLong,

    /// Implicit key spanning multiple lines
    #[display("implicit keys must be on a single line")]
    MultilineImplicitKey,

    /// Anchor or tag property attached to an alias
    #[display("anchor/tag cannot be applied to alias")]
    PropertiesOnAlias,

    /// Invalid anchor or alias name
    #[display("invalid anchor name")]
    InvalidAnchor,

    /// Alias referencing an anchor that has not been defined yet
    #[display("undefined alias '{_0}'")]
    UndefinedAlias(String),

    /// Invalid tag (malformed shorthand or verbatim tag that is neither a
    /// local tag nor a valid absolute URI)
    #[display("invalid tag")]
    InvalidTag,

    /// Tag handle used but not declared in the document's directives
    #[display("tag handle '{_0}' not declared in document")]
    UndefinedTagHandle(String),

    /// Invalid directive format
    #[display("invalid directive")]
    InvalidDirective,

    /// Second `%YAML` directive in a single document
    #[display("duplicate %YAML directive")]
    DuplicateYamlDirective,

    /// Directives not followed by `---`
    #[display("directives must be followed by '---'")]
    ExpectedDocumentStart,

    /// Directive after a document that was not terminated with `...`
    #[display("directives require a preceding '...' document end marker")]
    MissingDocumentEnd,
}

impl ErrorKind {
    /// Get a suggestion for how to fix this error.
    ///
    /// Returns `Some(suggestion)` if a helpful fix suggestion is available,
    /// or `None` if no specific suggestion applies.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidIndentation | Self::InvalidIndentationContext { .. } => {
                Some("YAML uses spaces for indentation; ensure consistent indentation levels")
            }
            Self::TabInIndentation => {
                Some("replace tabs with spaces; YAML requires space-based indentation")
            }
            Self::UnterminatedScalar => Some("add the matching closing quote character"),
            Self::InvalidEscape(_) | Self::BadHexEscape { .. } => {
                Some("valid escape sequences: \\n, \\r, \\t, \\\\, \\\", \\0, \\x##, \\u####, \\U########")
            }
            Self::UndefinedAlias(_) => {
                Some("define the anchor with &name before referencing it with *name")
            }
            Self::UndefinedTagHandle(_) => Some(
                "add a %TAG directive to define the handle, e.g., %TAG !e! tag:example.com,2000:",
            ),
            Self::InvalidBlockScalarHeader | Self::ZeroIndentationIndicator => Some(
                "use | or > followed by optional indent [1-9] and chomping [+-], e.g., |2- or >+",
            ),
            Self::TrailingContent => {
                Some("remove extra content after the node, or quote the entire value")
            }
            Self::MissingSeparator => Some("add a comma between flow collection elements"),
            Self::MissingColon => Some("add a colon after the mapping key"),
            Self::UnclosedFlowCollection => Some("add the matching closing bracket or brace"),
            Self::DocumentMarkerInFlow | Self::DocumentMarkerInScalar => {
                Some("document markers (--- and ...) cannot appear inside a node")
            }
            Self::KeyTooLong => {
                Some("use explicit key syntax (? key) for keys longer than 1024 characters")
            }
            Self::MultilineImplicitKey => Some(
                "use explicit key syntax (? key) for multiline keys, or keep the key on one line",
            ),
            Self::PropertiesOnAlias => Some(
                "aliases (*name) cannot have anchors or tags; apply them to the original value",
            ),
            Self::ExpectedDocumentStart | Self::MissingDocumentEnd => {
                Some("separate documents with '---' (and '...' before new directives)")
            }
            Self::UnexpectedEof
            | Self::InvalidCharacter
            | Self::NonPrintableCharacter
            | Self::EscapeOutOfRange(_)
            | Self::LeadingEmptyLineTooDeep
            | Self::InvalidAnchor
            | Self::InvalidTag
            | Self::InvalidDirective
            | Self::DuplicateYamlDirective => None,
        }
    }
}

impl ParseError {
    /// Create a new error with a kind and span.
    ///
    /// The `document_index` is initialized to 0; the stream parser rewrites
    /// it via [`in_document`](Self::in_document) when it knows which
    /// document was being parsed.
    #[must_use]
    pub const fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            document_index: 0,
        }
    }

    /// Set the index of the document this error belongs to.
    #[must_use]
    pub const fn in_document(mut self, index: usize) -> Self {
        self.document_index = index;
        self
    }

    /// Get a suggestion for how to fix this error.
    ///
    /// Delegates to [`ErrorKind::suggestion()`].
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        self.kind.suggestion()
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.span.start)
    }
}

impl std::error::Error for ParseError {}

/// A non-fatal diagnostic attached to a document.
///
/// Warnings do not stop the parse; they are collected on the document that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The kind of warning.
    pub kind: WarningKind,
    /// The span in the source that triggered the warning.
    pub span: Span,
}

/// The kind of warning.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum WarningKind {
    /// `%YAML` directive declaring a version newer than 1.2; the document
    /// is parsed as 1.2 but the declared version is preserved.
    #[display("unsupported YAML version {major}.{minor}, parsing as 1.2")]
    UnsupportedVersion {
        /// Declared major version.
        major: u32,
        /// Declared minor version.
        minor: u32,
    },

    /// Directive with a name other than `YAML` or `TAG`.
    #[display("unknown directive '%{_0}' ignored")]
    ReservedDirective(String),

    /// `%TAG` directive re-binding a handle already bound in this document;
    /// the later binding wins.
    #[display("duplicate %TAG handle '{_0}'")]
    DuplicateTagHandle(String),
}
