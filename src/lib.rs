// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! A YAML 1.2 grammar engine.
//!
//! This crate parses a Unicode character stream into a serialization-level
//! token tree: documents with their directives, nodes with anchors, tags
//! and scalar styles, and block/flow structure, all carrying source spans.
//! Scalar content is normalized (folding, chomping, escape decoding) into
//! owned strings, so the tree never borrows from the input.
//!
//! Tag resolution against a schema, construction of native values, and
//! emission are deliberately out of scope; aliases stay name references
//! for a downstream composer to resolve.
//!
//! # Example
//!
//! ```
//! use yaml_syntax::{parse, Value};
//!
//! let stream = parse("name: John\nage: '30'\n").unwrap();
//! assert_eq!(stream.len(), 1);
//! let doc = &stream.documents[0];
//! if let Value::Mapping { entries, .. } = &doc.root.value {
//!     assert_eq!(entries.len(), 2);
//!     assert_eq!(entries[0].0.as_scalar(), Some("name"));
//! } else {
//!     panic!("expected a mapping");
//! }
//! ```
//!
//! Parsing aborts at the first hard error:
//!
//! ```
//! use yaml_syntax::parse;
//!
//! let err = parse("key: \"unterminated\n").unwrap_err();
//! eprintln!("{err} (document {})", err.document_index);
//! ```

mod chars;
mod cursor;
mod error;
mod parser;
mod scan;
mod span;
mod tree;
pub mod uri;

pub use error::{ErrorKind, ParseError, Warning, WarningKind};
pub use span::{Position, Span, Spanned};
pub use tree::{
    CollectionStyle, Directive, Document, DocumentKind, Node, ScalarStyle, Stream, Tag, Value,
};

/// Parse a YAML stream into its token tree.
///
/// The input must be a decoded Unicode string; byte-order-mark stripping
/// and transcoding are the caller's responsibility. An empty or
/// comments-only input yields a stream with zero documents.
///
/// # Errors
///
/// Returns the first hard error encountered. The error carries the source
/// position and the index of the document being parsed; any documents
/// parsed before the failure are discarded.
pub fn parse(input: &str) -> Result<Stream, ParseError> {
    let src: Vec<char> = input.chars().collect();
    parser::parse_stream(&src)
}

#[cfg(test)]
mod tests;
