// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Block structure parsing: block nodes, sequences and mappings.
//!
//! Block collections are indentation-scoped: the first entry fixes the
//! column and every further entry must sit exactly there. A line that does
//! not match simply ends the collection; whatever remains is judged by the
//! enclosing structure, ultimately by the document layer.

use crate::cursor::Cursor;
use crate::error::ErrorKind;
use crate::scan;
use crate::span::Span;
use crate::tree::{CollectionStyle, Node, Value};

use super::{Context, NodeProperties, Parse, Parser, MAX_IMPLICIT_KEY_LEN};

/// `-` starts a sequence entry only when followed by whitespace or the end
/// of the line (`-1` is a plain scalar, not an entry).
fn at_seq_entry(cur: Cursor<'_>) -> bool {
    cur.peek() == Some('-')
        && cur
            .peek_at(1)
            .is_none_or(|c| crate::chars::is_white(c) || crate::chars::is_break(c))
}

/// `?` (or `:`) acts as a block indicator only when followed by whitespace
/// or the end of the line.
fn indicator_then_space(cur: Cursor<'_>, indicator: char) -> bool {
    cur.peek() == Some(indicator)
        && cur
            .peek_at(1)
            .is_none_or(|c| crate::chars::is_white(c) || crate::chars::is_break(c))
}

impl Parser {
    /// `s-l+block-node(n, c)`: a block scalar, block collection, or a flow
    /// node embedded in block context.
    pub(crate) fn block_node<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        match self.block_scalar_node(cur, n, ctx) {
            Parse::Failure(_) => {}
            other => return other,
        }
        match self.block_collection(cur, n, ctx) {
            Parse::Failure(_) => {}
            other => return other,
        }
        self.flow_in_block(cur, n)
    }

    /// A literal or folded scalar, with optional properties, after a
    /// separation at `n+1`.
    fn block_scalar_node<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        let Parse::Success((), after_sep) = self.separate(cur, n + 1, ctx) else {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        };
        let (props, at_indicator) = match after_sep.peek() {
            Some('!' | '&') => match self.node_properties(after_sep, n + 1, ctx) {
                Parse::Success(props, after_props) => {
                    match self.separate(after_props, n + 1, ctx) {
                        Parse::Success((), c) => (props, c),
                        _ => (NodeProperties::default(), after_sep),
                    }
                }
                Parse::Error(e) => return Parse::Error(e),
                Parse::Failure(_) => (NodeProperties::default(), after_sep),
            },
            _ => (NodeProperties::default(), after_sep),
        };
        let literal = match at_indicator.peek() {
            Some('|') => true,
            Some('>') => false,
            _ => return self.fail(ErrorKind::InvalidCharacter, at_indicator.span_here()),
        };
        self.block_scalar(at_indicator, n, literal)
            .map(|node| props.apply_to(node))
    }

    /// A block sequence or mapping, with optional properties on the line
    /// before it.
    fn block_collection<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        let mut props = NodeProperties::default();
        let mut after_props = cur;
        if let Parse::Success((), c) = self.separate(cur, n + 1, ctx) {
            if matches!(c.peek(), Some('!' | '&')) {
                match self.node_properties(c, n + 1, ctx) {
                    Parse::Success(p, c2) => {
                        props = p;
                        after_props = c2;
                    }
                    Parse::Error(e) => return Parse::Error(e),
                    Parse::Failure(_) => {}
                }
            }
        }
        let Some(at_line) = scan::trailing_comments(after_props) else {
            return self.fail(ErrorKind::InvalidCharacter, after_props.span_here());
        };

        let seq_indent = if ctx == Context::BlockOut { n - 1 } else { n };
        match self.block_sequence(at_line, seq_indent) {
            Parse::Failure(_) => {}
            other => return other.map(|node| props.apply_to(node)),
        }
        self.block_mapping(at_line, n)
            .map(|node| props.apply_to(node))
    }

    /// A flow node in block context: separated at `n+1`, parsed in
    /// flow-out, and terminated by comments to the end of the line.
    fn flow_in_block<'a>(&mut self, cur: Cursor<'a>, n: i32) -> Parse<'a, Node> {
        let Parse::Success((), at_node) = self.separate(cur, n + 1, Context::FlowOut) else {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        };
        match self.flow_node(at_node, n + 1, Context::FlowOut) {
            Parse::Success(node, after) => match scan::trailing_comments(after) {
                Some(done) => Parse::Success(node, done),
                None => self.abort(ErrorKind::TrailingContent, after.span_here()),
            },
            other => other,
        }
    }

    /// `l+block-sequence(n)`: entries at a detected indentation `w > n`.
    fn block_sequence<'a>(&mut self, cur: Cursor<'a>, n: i32) -> Parse<'a, Node> {
        if cur.is_eof() {
            return self.fail(ErrorKind::UnexpectedEof, cur.span_here());
        }
        let start = cur.position();
        let (w, at_entry) = scan::count_spaces(cur);
        if (w as i32) <= n || !at_seq_entry(at_entry) {
            return self.fail(ErrorKind::InvalidCharacter, at_entry.span_here());
        }

        let mut items: Vec<Node> = Vec::new();
        let mut cur = cur;
        loop {
            if cur.is_eof() || cur.at_document_marker() {
                break;
            }
            let entry_cur = match scan::indent_exact(cur, w as i32) {
                Some(c) if at_seq_entry(c) => c,
                _ => {
                    if items.is_empty() {
                        return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
                    }
                    if let Some(span) = scan::tab_in_indentation(cur, usize::MAX) {
                        return self.abort(ErrorKind::TabInIndentation, span);
                    }
                    break;
                }
            };
            match self.block_indented(entry_cur.bump(), w as i32, Context::BlockIn) {
                Parse::Success(node, after) => {
                    items.push(node);
                    cur = after;
                }
                Parse::Failure(e) => {
                    if items.is_empty() {
                        return Parse::Failure(e);
                    }
                    break;
                }
                Parse::Error(e) => return Parse::Error(e),
            }
        }
        let end = items.last().map_or(start, |node| node.span.end);
        Parse::Success(
            Node::new(
                Value::Sequence {
                    style: CollectionStyle::Block,
                    items,
                },
                Span::new(start, end),
            ),
            cur,
        )
    }

    /// `l+block-mapping(n)`: entries at a detected indentation `w > n`.
    fn block_mapping<'a>(&mut self, cur: Cursor<'a>, n: i32) -> Parse<'a, Node> {
        if cur.is_eof() {
            return self.fail(ErrorKind::UnexpectedEof, cur.span_here());
        }
        let start = cur.position();
        let (w, _) = scan::count_spaces(cur);
        if (w as i32) <= n {
            return self.fail(ErrorKind::InvalidIndentation, cur.span_here());
        }

        let mut entries: Vec<(Node, Node)> = Vec::new();
        let mut cur = cur;
        loop {
            if cur.is_eof() || cur.at_document_marker() {
                break;
            }
            let entry_cur = match scan::indent_exact(cur, w as i32) {
                Some(c) if c.peek().is_some_and(|ch| ch != ' ' && !crate::chars::is_break(ch)) => c,
                _ => {
                    if entries.is_empty() {
                        return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
                    }
                    if let Some(span) = scan::tab_in_indentation(cur, usize::MAX) {
                        return self.abort(ErrorKind::TabInIndentation, span);
                    }
                    break;
                }
            };
            match self.block_map_entry(entry_cur, w as i32) {
                Parse::Success(entry, after) => {
                    entries.push(entry);
                    cur = after;
                }
                Parse::Failure(e) => {
                    if entries.is_empty() {
                        return Parse::Failure(e);
                    }
                    if let Some(span) = scan::tab_in_indentation(cur, usize::MAX) {
                        return self.abort(ErrorKind::TabInIndentation, span);
                    }
                    break;
                }
                Parse::Error(e) => return Parse::Error(e),
            }
        }
        if entries.is_empty() {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        }
        let end = entries.last().map_or(start, |(_, value)| value.span.end);
        Parse::Success(
            Node::new(
                Value::Mapping {
                    style: CollectionStyle::Block,
                    entries,
                },
                Span::new(start, end),
            ),
            cur,
        )
    }

    /// One block mapping entry, explicit (`? key` / `: value`) or implicit
    /// (`key: value`). The cursor sits at the entry's column `w`.
    fn block_map_entry<'a>(
        &mut self,
        cur: Cursor<'a>,
        w: i32,
    ) -> Parse<'a, (Node, Node)> {
        // Explicit entry.
        if indicator_then_space(cur, '?') {
            let key = match self.block_indented(cur.bump(), w, Context::BlockOut) {
                Parse::Success(key, after) => (key, after),
                Parse::Failure(e) => return Parse::Failure(e),
                Parse::Error(e) => return Parse::Error(e),
            };
            let (key, after_key) = key;
            if let Some(at_colon) = scan::indent_exact(after_key, w) {
                if indicator_then_space(at_colon, ':') {
                    return match self.block_indented(at_colon.bump(), w, Context::BlockOut) {
                        Parse::Success(value, after) => Parse::Success((key, value), after),
                        Parse::Failure(e) => Parse::Failure(e),
                        Parse::Error(e) => Parse::Error(e),
                    };
                }
            }
            let value = Node::empty(after_key.span_here());
            return Parse::Success((key, value), after_key);
        }

        // Implicit entry with an omitted key: `: value`.
        if indicator_then_space(cur, ':') {
            let key = Node::empty(cur.span_here());
            return self
                .block_map_value(cur.bump(), w)
                .map(|value| (key, value));
        }

        // Implicit entry: a single-line key, then `:`.
        let (key, after_key) = match self.flow_node(cur, 0, Context::BlockKey) {
            Parse::Success(key, after) => (key, after),
            Parse::Failure(e) => return Parse::Failure(e),
            Parse::Error(e) => return Parse::Error(e),
        };
        let at_colon = scan::separate_in_line(after_key).unwrap_or(after_key);
        if !indicator_then_space(at_colon, ':') {
            return self.fail(ErrorKind::MissingColon, at_colon.span_here());
        }
        if key.span.len() > MAX_IMPLICIT_KEY_LEN {
            return self.abort(ErrorKind::KeyTooLong, key.span);
        }
        self.block_map_value(at_colon.bump(), w)
            .map(|value| (key, value))
    }

    /// The value of an implicit mapping entry: a block node, or an empty
    /// node followed by comments.
    fn block_map_value<'a>(&mut self, cur: Cursor<'a>, w: i32) -> Parse<'a, Node> {
        match self.block_node(cur, w, Context::BlockOut) {
            Parse::Failure(_) => {}
            other => return other,
        }
        match scan::trailing_comments(cur) {
            Some(after) => Parse::Success(Node::empty(cur.span_here()), after),
            None => self.abort(ErrorKind::TrailingContent, cur.span_here()),
        }
    }

    /// `s-l+block-indented(n, c)`: what may follow a `-`, `?` or `:`
    /// indicator on the same line — a compact collection whose indentation
    /// includes the indicator's width, a regular block node, or nothing.
    pub(crate) fn block_indented<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        let (m, at_content) = scan::count_spaces(cur);
        if m > 0 && !at_content.at_break_or_eof() {
            let compact_indent = n + 1 + m as i32;
            if at_seq_entry(at_content) {
                return self.compact_sequence(at_content, compact_indent);
            }
            match self.compact_mapping(at_content, compact_indent) {
                Parse::Failure(_) => {}
                other => return other,
            }
        }
        match self.block_node(cur, n, ctx) {
            Parse::Failure(_) => {}
            other => return other,
        }
        match scan::trailing_comments(cur) {
            Some(after) => Parse::Success(Node::empty(cur.span_here()), after),
            None => self.fail(ErrorKind::InvalidCharacter, cur.span_here()),
        }
    }

    /// A compact sequence: its first `-` sits on the current line, further
    /// entries at indentation `n`.
    fn compact_sequence<'a>(&mut self, cur: Cursor<'a>, n: i32) -> Parse<'a, Node> {
        let start = cur.position();
        let mut items: Vec<Node> = Vec::new();
        let mut cur = cur;
        loop {
            let entry_cur = if items.is_empty() {
                cur
            } else {
                if cur.is_eof() || cur.at_document_marker() {
                    break;
                }
                match scan::indent_exact(cur, n) {
                    Some(c) if at_seq_entry(c) => c,
                    _ => break,
                }
            };
            match self.block_indented(entry_cur.bump(), n, Context::BlockIn) {
                Parse::Success(node, after) => {
                    items.push(node);
                    cur = after;
                }
                Parse::Failure(e) => {
                    if items.is_empty() {
                        return Parse::Failure(e);
                    }
                    break;
                }
                Parse::Error(e) => return Parse::Error(e),
            }
        }
        let end = items.last().map_or(start, |node| node.span.end);
        Parse::Success(
            Node::new(
                Value::Sequence {
                    style: CollectionStyle::Block,
                    items,
                },
                Span::new(start, end),
            ),
            cur,
        )
    }

    /// A compact mapping: its first entry sits on the current line, further
    /// entries at indentation `n`.
    fn compact_mapping<'a>(&mut self, cur: Cursor<'a>, n: i32) -> Parse<'a, Node> {
        let start = cur.position();
        let mut entries: Vec<(Node, Node)> = Vec::new();
        let mut cur = cur;
        loop {
            let entry_cur = if entries.is_empty() {
                cur
            } else {
                if cur.is_eof() || cur.at_document_marker() {
                    break;
                }
                match scan::indent_exact(cur, n) {
                    Some(c) if c.peek().is_some_and(|ch| ch != ' ' && !crate::chars::is_break(ch)) => {
                        c
                    }
                    _ => break,
                }
            };
            match self.block_map_entry(entry_cur, n) {
                Parse::Success(entry, after) => {
                    entries.push(entry);
                    cur = after;
                }
                Parse::Failure(e) => {
                    if entries.is_empty() {
                        return Parse::Failure(e);
                    }
                    break;
                }
                Parse::Error(e) => return Parse::Error(e),
            }
        }
        if entries.is_empty() {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        }
        let end = entries.last().map_or(start, |(_, value)| value.span.end);
        Parse::Success(
            Node::new(
                Value::Mapping {
                    style: CollectionStyle::Block,
                    entries,
                },
                Span::new(start, end),
            ),
            cur,
        )
    }
}
