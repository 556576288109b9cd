// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Stream and document parsing.
//!
//! The stream layer splits the input at `---`/`...` markers, parses the
//! directive prologue of each document, hands the body to the block-node
//! grammar at indentation −1, and enforces the composition rules: at most
//! one `%YAML` per document, directives only after a terminated document,
//! and a `---` before any document that follows unterminated content.
//!
//! Tag-handle bindings are document-scoped (each document resets to the
//! `!` and `!!` defaults); anchors accumulate across the stream so a later
//! document may alias an earlier one's nodes.

use std::collections::HashSet;

use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError, WarningKind};
use crate::scan;
use crate::span::Spanned;
use crate::tree::{Directive, Document, DocumentKind, Node, Stream, Value};

use super::{Context, Parse, Parser};

/// Parse a complete YAML stream.
///
/// Aborts at the first hard error; the error names the document that was
/// being parsed when it occurred.
pub(crate) fn parse_stream(src: &[char]) -> Result<Stream, ParseError> {
    let mut cur = Cursor::new(src);
    let mut documents: Vec<Document> = Vec::new();
    let mut anchors: HashSet<String> = HashSet::new();
    let mut prev_terminated = true;

    loop {
        cur = skip_document_prefix(cur);
        if cur.is_eof() {
            break;
        }

        // Document suffix: `...` followed only by comments.
        if cur.at_document_marker() && cur.starts_with("...") {
            let after_marker = cur.advance(3);
            match scan::trailing_comments(after_marker) {
                Some(next) => {
                    cur = next;
                    prev_terminated = true;
                    continue;
                }
                None => {
                    return Err(ParseError::new(
                        ErrorKind::TrailingContent,
                        after_marker.span_here(),
                    )
                    .in_document(documents.len()));
                }
            }
        }

        let doc_index = documents.len();
        let mut parser = Parser::new();
        let (document, after) = match parser.document(cur, prev_terminated) {
            Parse::Success(document, after) => (document, after),
            Parse::Failure(e) | Parse::Error(e) => return Err(e.in_document(doc_index)),
        };
        if let Err(e) = check_aliases(&document.root, &mut anchors) {
            return Err(e.in_document(doc_index));
        }
        documents.push(document);
        prev_terminated = false;
        cur = after;
    }

    Ok(Stream { documents })
}

/// Skip the document prefix: an optional byte order mark plus comment and
/// blank lines.
fn skip_document_prefix(cur: Cursor<'_>) -> Cursor<'_> {
    let mut cur = cur;
    loop {
        let mut progressed = false;
        if cur.at_line_start() && cur.peek() == Some('\u{FEFF}') {
            cur = cur.bump();
            progressed = true;
        }
        let after = scan::comment_lines(cur);
        if after.position().offset != cur.position().offset {
            progressed = true;
        }
        cur = after;
        if !progressed {
            return cur;
        }
    }
}

/// Validate that every alias names an anchor that precedes it in the
/// stream. Anchors register before their node's content is walked, so an
/// alias inside an anchored collection may reference the collection
/// itself; the core still builds no graph.
fn check_aliases(node: &Node, defined: &mut HashSet<String>) -> Result<(), ParseError> {
    if let Some(anchor) = &node.anchor {
        defined.insert(anchor.clone());
    }
    match &node.value {
        Value::Alias(name) => {
            if !defined.contains(name) {
                return Err(ParseError::new(
                    ErrorKind::UndefinedAlias(name.clone()),
                    node.span,
                ));
            }
        }
        Value::Sequence { items, .. } => {
            for item in items {
                check_aliases(item, defined)?;
            }
        }
        Value::Mapping { entries, .. } => {
            for (key, value) in entries {
                check_aliases(key, defined)?;
                check_aliases(value, defined)?;
            }
        }
        Value::Scalar { .. } | Value::Empty => {}
    }
    Ok(())
}

impl Parser {
    /// Parse one document: directives, an optional `---`, the root node,
    /// and the trailing comments up to the next document boundary.
    fn document<'a>(
        &mut self,
        cur: Cursor<'a>,
        prev_terminated: bool,
    ) -> Parse<'a, Document> {
        let mut directives: Vec<Spanned<Directive>> = Vec::new();
        let mut has_yaml = false;
        let mut cur = cur;

        while cur.at_line_start() && cur.peek() == Some('%') {
            if !prev_terminated {
                return self.abort(ErrorKind::MissingDocumentEnd, cur.span_here());
            }
            let (directive, span, after) = match self.directive(cur) {
                Parse::Success((directive, span), after) => (directive, span, after),
                Parse::Failure(e) | Parse::Error(e) => return Parse::Error(e),
            };
            match &directive {
                Directive::Yaml { major, minor } => {
                    if has_yaml {
                        return self.abort(ErrorKind::DuplicateYamlDirective, span);
                    }
                    has_yaml = true;
                    if (*major, *minor) > (1, 2) {
                        self.warn(
                            WarningKind::UnsupportedVersion {
                                major: *major,
                                minor: *minor,
                            },
                            span,
                        );
                    }
                }
                Directive::Tag { handle, prefix } => {
                    if !self.bind_tag_handle(handle.clone(), prefix.clone()) {
                        self.warn(WarningKind::DuplicateTagHandle(handle.clone()), span);
                    }
                }
                Directive::Reserved { .. } => {}
            }
            directives.push((directive, span));
            cur = scan::comment_lines(after);
        }

        if !directives.is_empty() && !(cur.at_document_marker() && cur.starts_with("---")) {
            return self.abort(ErrorKind::ExpectedDocumentStart, cur.span_here());
        }

        let (kind, root, after_root) = if cur.at_document_marker() && cur.starts_with("---") {
            let kind = if directives.is_empty() {
                DocumentKind::Explicit
            } else {
                DocumentKind::Directive
            };
            let after_marker = cur.advance(3);
            match self.block_node(after_marker, -1, Context::BlockIn) {
                Parse::Success(root, after) => (kind, root, after),
                Parse::Error(e) => return Parse::Error(e),
                Parse::Failure(_) => match scan::trailing_comments(after_marker) {
                    Some(after) => (kind, Node::empty(after_marker.span_here()), after),
                    None => {
                        return self.abort(ErrorKind::TrailingContent, after_marker.span_here());
                    }
                },
            }
        } else {
            if !prev_terminated {
                return self.abort(ErrorKind::ExpectedDocumentStart, cur.span_here());
            }
            match self.block_node(cur, -1, Context::BlockIn) {
                Parse::Success(root, after) => (DocumentKind::Bare, root, after),
                Parse::Error(e) => return Parse::Error(e),
                Parse::Failure(_) => {
                    return self.abort(ErrorKind::InvalidCharacter, cur.span_here());
                }
            }
        };

        let after = match scan::trailing_comments(after_root) {
            Some(after) => after,
            None => return self.abort(ErrorKind::TrailingContent, after_root.span_here()),
        };
        if !after.is_eof() && !after.at_document_marker() {
            if after.at_line_start() && after.peek() == Some('%') {
                return self.abort(ErrorKind::MissingDocumentEnd, after.span_here());
            }
            return self.abort(ErrorKind::TrailingContent, after.span_here());
        }

        Parse::Success(
            Document {
                kind,
                directives,
                root,
                warnings: std::mem::take(&mut self.warnings),
            },
            after,
        )
    }

    /// Parse one `%` directive line, including its trailing comment.
    fn directive<'a>(&mut self, cur: Cursor<'a>) -> Parse<'a, Spanned<Directive>> {
        let start = cur.position();
        let Some(after_percent) = cur.eat_char('%') else {
            return self.fail(ErrorKind::InvalidDirective, cur.span_here());
        };
        let (count, after_name) = after_percent.eat_while(crate::chars::is_ns_char);
        if count == 0 {
            return self.abort(ErrorKind::InvalidDirective, after_name.span_from(start));
        }
        let name = self.slice_to_string(after_percent, count);
        match name.as_str() {
            "YAML" => self.yaml_directive(after_name, start),
            "TAG" => self.tag_directive(after_name, start),
            _ => self.reserved_directive(after_name, name, start),
        }
    }

    /// `%YAML major.minor`
    fn yaml_directive<'a>(
        &mut self,
        cur: Cursor<'a>,
        start: crate::span::Position,
    ) -> Parse<'a, Spanned<Directive>> {
        let (sep, cur) = cur.eat_while(crate::chars::is_white);
        if sep == 0 {
            return self.abort(ErrorKind::InvalidDirective, cur.span_from(start));
        }
        let (major_len, after_major) = cur.eat_while(crate::chars::is_dec_digit);
        let Some(after_dot) = after_major.eat_char('.') else {
            return self.abort(ErrorKind::InvalidDirective, after_major.span_from(start));
        };
        let (minor_len, after_minor) = after_dot.eat_while(crate::chars::is_dec_digit);
        if major_len == 0 || minor_len == 0 {
            return self.abort(ErrorKind::InvalidDirective, after_minor.span_from(start));
        }
        let major = self
            .slice_to_string(cur, major_len)
            .parse::<u32>()
            .unwrap_or(u32::MAX);
        let minor = self
            .slice_to_string(after_dot, minor_len)
            .parse::<u32>()
            .unwrap_or(u32::MAX);
        let span = after_minor.span_from(start);
        let Some(after) = scan::line_trailer(after_minor) else {
            return self.abort(ErrorKind::InvalidDirective, after_minor.span_here());
        };
        Parse::Success((Directive::Yaml { major, minor }, span), after)
    }

    /// `%TAG handle prefix`
    fn tag_directive<'a>(
        &mut self,
        cur: Cursor<'a>,
        start: crate::span::Position,
    ) -> Parse<'a, Spanned<Directive>> {
        let (sep, cur) = cur.eat_while(crate::chars::is_white);
        if sep == 0 {
            return self.abort(ErrorKind::InvalidDirective, cur.span_from(start));
        }
        // Handle: `!`, `!!`, or `!name!`.
        let Some(after_bang) = cur.eat_char('!') else {
            return self.abort(ErrorKind::InvalidDirective, cur.span_from(start));
        };
        let (word_len, after_word) = after_bang.eat_while(crate::chars::is_word_char);
        let (handle, after_handle) = if after_word.peek() == Some('!') {
            let mut handle = String::with_capacity(word_len + 2);
            handle.push('!');
            handle.push_str(&self.slice_to_string(after_bang, word_len));
            handle.push('!');
            (handle, after_word.bump())
        } else if word_len == 0 {
            ("!".to_owned(), after_bang)
        } else {
            return self.abort(ErrorKind::InvalidDirective, after_word.span_from(start));
        };

        let (sep, after_sep) = after_handle.eat_while(crate::chars::is_white);
        if sep == 0 {
            return self.abort(ErrorKind::InvalidDirective, after_handle.span_from(start));
        }
        let (prefix_len, after_prefix) = after_sep.eat_while(crate::chars::is_uri_char);
        let prefix = self.slice_to_string(after_sep, prefix_len);
        let prefix_ok = match prefix.chars().next() {
            Some('!') => crate::uri::has_valid_escapes(&prefix),
            Some(first) => {
                crate::chars::is_tag_char(first) && crate::uri::has_valid_escapes(&prefix)
            }
            None => false,
        };
        if !prefix_ok {
            return self.abort(ErrorKind::InvalidDirective, after_prefix.span_from(start));
        }
        let span = after_prefix.span_from(start);
        let Some(after) = scan::line_trailer(after_prefix) else {
            return self.abort(ErrorKind::InvalidDirective, after_prefix.span_here());
        };
        Parse::Success((Directive::Tag { handle, prefix }, span), after)
    }

    /// Any other directive: collect its parameters and warn.
    fn reserved_directive<'a>(
        &mut self,
        cur: Cursor<'a>,
        name: String,
        start: crate::span::Position,
    ) -> Parse<'a, Spanned<Directive>> {
        let mut params: Vec<String> = Vec::new();
        let mut cur = cur;
        loop {
            let (sep, after_sep) = cur.eat_while(crate::chars::is_white);
            if sep == 0 || after_sep.peek() == Some('#') {
                break;
            }
            let (len, after_param) = after_sep.eat_while(crate::chars::is_ns_char);
            if len == 0 {
                break;
            }
            params.push(self.slice_to_string(after_sep, len));
            cur = after_param;
        }
        let span = cur.span_from(start);
        let Some(after) = scan::line_trailer(cur) else {
            return self.abort(ErrorKind::InvalidDirective, cur.span_here());
        };
        self.warn(WarningKind::ReservedDirective(name.clone()), span);
        Parse::Success((Directive::Reserved { name, params }, span), after)
    }
}
