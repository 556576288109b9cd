// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Flow structure parsing: flow nodes, sequences, mappings and pairs.
//!
//! Flow collections use explicit `[]{},` delimiters and may span lines.
//! Sequences admit single-pair mappings (`[a: b]`), mappings admit
//! explicit, implicit and empty-key entries, and JSON-like keys allow the
//! `:` to sit adjacent to the key. Implicit keys stay on one line and are
//! capped at 1024 code points.

use crate::chars;
use crate::cursor::Cursor;
use crate::error::ErrorKind;
use crate::span::Span;
use crate::tree::{CollectionStyle, Node, ScalarStyle, Value};

use super::{Context, Parse, Parser, MAX_IMPLICIT_KEY_LEN};

/// JSON-like nodes (quoted scalars and flow collections) permit an
/// adjacent `:` with no separation.
fn is_json_like(node: &Node) -> bool {
    matches!(
        &node.value,
        Value::Scalar {
            style: ScalarStyle::SingleQuoted | ScalarStyle::DoubleQuoted,
            ..
        } | Value::Sequence {
            style: CollectionStyle::Flow,
            ..
        } | Value::Mapping {
            style: CollectionStyle::Flow,
            ..
        }
    )
}

/// `?` starts an explicit flow entry only when followed by whitespace, a
/// break, a flow delimiter, or nothing.
fn at_explicit_flow_key(cur: Cursor<'_>) -> bool {
    cur.peek() == Some('?')
        && cur
            .peek_at(1)
            .is_none_or(|c| chars::is_white(c) || chars::is_break(c) || chars::is_flow_indicator(c))
}

impl Parser {
    /// `ns-flow-node(n, c)`: an alias, flow content, or properties followed
    /// by flow content (or nothing).
    pub(crate) fn flow_node<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        if cur.peek() == Some('*') {
            return self.alias_node(cur);
        }
        if !matches!(cur.peek(), Some('!' | '&')) {
            return self.flow_content(cur, n, ctx);
        }
        match self.node_properties(cur, n, ctx) {
            Parse::Success(props, after_props) => {
                if let Parse::Success((), at_content) = self.separate(after_props, n, ctx) {
                    if at_content.peek() == Some('*') {
                        return self.abort_unless_key(
                            ctx,
                            ErrorKind::PropertiesOnAlias,
                            at_content.span_here(),
                        );
                    }
                    match self.flow_content(at_content, n, ctx) {
                        Parse::Failure(_) => {}
                        other => return other.map(|node| props.apply_to(node)),
                    }
                }
                // Properties with no content: an empty scalar.
                let node = Node::empty(after_props.span_here());
                Parse::Success(props.apply_to(node), after_props)
            }
            Parse::Failure(e) => Parse::Failure(e),
            Parse::Error(e) => Parse::Error(e),
        }
    }

    /// Dispatch on the first character of flow content.
    fn flow_content<'a>(&mut self, cur: Cursor<'a>, n: i32, ctx: Context) -> Parse<'a, Node> {
        match cur.peek() {
            None => self.fail(ErrorKind::UnexpectedEof, cur.span_here()),
            Some('[') => self.flow_sequence(cur, n, ctx),
            Some('{') => self.flow_mapping(cur, n, ctx),
            Some('"') => self.double_quoted(cur, n, ctx),
            Some('\'') => self.single_quoted(cur, n, ctx),
            Some('@' | '`') => {
                // Reserved indicators may not start any node.
                self.abort_unless_key(ctx, ErrorKind::InvalidCharacter, cur.span_here())
            }
            Some(_) => self.plain_scalar(cur, n, ctx),
        }
    }

    /// An alias node: `*name`.
    fn alias_node<'a>(&mut self, cur: Cursor<'a>) -> Parse<'a, Node> {
        let start = cur.position();
        let Some(after_star) = cur.eat_char('*') else {
            return self.fail(ErrorKind::InvalidAnchor, cur.span_here());
        };
        let (count, after) = after_star.eat_while(chars::is_anchor_char);
        if count == 0 {
            return self.abort(ErrorKind::InvalidAnchor, after.span_from(start));
        }
        let name = self.slice_to_string(after_star, count);
        let span = after.span_from(start);
        Parse::Success(Node::new(Value::Alias(name), span), after)
    }

    /// `c-flow-sequence(n, c)`: `[ … ]`.
    fn flow_sequence<'a>(&mut self, cur: Cursor<'a>, n: i32, ctx: Context) -> Parse<'a, Node> {
        let start = cur.position();
        let Some(after_open) = cur.eat_char('[') else {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        };
        let inner = ctx.in_flow();
        let mut cur = self.skip_separation(after_open, n, inner);
        let mut items: Vec<Node> = Vec::new();

        loop {
            match cur.peek() {
                None => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::UnclosedFlowCollection,
                        cur.span_from(start),
                    );
                }
                Some(']') => {
                    cur = cur.bump();
                    break;
                }
                _ => {}
            }
            if cur.at_document_marker() {
                return self.abort_unless_key(ctx, ErrorKind::DocumentMarkerInFlow, cur.span_here());
            }
            match self.flow_seq_entry(cur, n, inner) {
                Parse::Success(entry, after) => {
                    items.push(entry);
                    cur = after;
                }
                Parse::Failure(_) => {
                    return self.abort_unless_key(ctx, ErrorKind::InvalidCharacter, cur.span_here());
                }
                Parse::Error(e) => return Parse::Error(e),
            }
            cur = self.skip_separation(cur, n, inner);
            match cur.peek() {
                Some(',') => {
                    cur = self.skip_separation(cur.bump(), n, inner);
                }
                Some(']') => {
                    cur = cur.bump();
                    break;
                }
                None => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::UnclosedFlowCollection,
                        cur.span_from(start),
                    );
                }
                Some(_) => {
                    if cur.at_document_marker() {
                        return self.abort_unless_key(
                            ctx,
                            ErrorKind::DocumentMarkerInFlow,
                            cur.span_here(),
                        );
                    }
                    return self.abort_unless_key(ctx, ErrorKind::MissingSeparator, cur.span_here());
                }
            }
        }
        Parse::Success(
            Node::new(
                Value::Sequence {
                    style: CollectionStyle::Flow,
                    items,
                },
                cur.span_from(start),
            ),
            cur,
        )
    }

    /// `c-flow-mapping(n, c)`: `{ … }`.
    fn flow_mapping<'a>(&mut self, cur: Cursor<'a>, n: i32, ctx: Context) -> Parse<'a, Node> {
        let start = cur.position();
        let Some(after_open) = cur.eat_char('{') else {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        };
        let inner = ctx.in_flow();
        let mut cur = self.skip_separation(after_open, n, inner);
        let mut entries: Vec<(Node, Node)> = Vec::new();

        loop {
            match cur.peek() {
                None => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::UnclosedFlowCollection,
                        cur.span_from(start),
                    );
                }
                Some('}') => {
                    cur = cur.bump();
                    break;
                }
                _ => {}
            }
            if cur.at_document_marker() {
                return self.abort_unless_key(ctx, ErrorKind::DocumentMarkerInFlow, cur.span_here());
            }
            match self.flow_map_entry(cur, n, inner) {
                Parse::Success(entry, after) => {
                    entries.push(entry);
                    cur = after;
                }
                Parse::Failure(_) => {
                    return self.abort_unless_key(ctx, ErrorKind::InvalidCharacter, cur.span_here());
                }
                Parse::Error(e) => return Parse::Error(e),
            }
            cur = self.skip_separation(cur, n, inner);
            match cur.peek() {
                Some(',') => {
                    cur = self.skip_separation(cur.bump(), n, inner);
                }
                Some('}') => {
                    cur = cur.bump();
                    break;
                }
                None => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::UnclosedFlowCollection,
                        cur.span_from(start),
                    );
                }
                Some(_) => {
                    if cur.at_document_marker() {
                        return self.abort_unless_key(
                            ctx,
                            ErrorKind::DocumentMarkerInFlow,
                            cur.span_here(),
                        );
                    }
                    return self.abort_unless_key(ctx, ErrorKind::MissingSeparator, cur.span_here());
                }
            }
        }
        Parse::Success(
            Node::new(
                Value::Mapping {
                    style: CollectionStyle::Flow,
                    entries,
                },
                cur.span_from(start),
            ),
            cur,
        )
    }

    /// A sequence entry: a single-pair mapping (`a: b`, `? a : b`, `: b`)
    /// or a plain flow node.
    fn flow_seq_entry<'a>(&mut self, cur: Cursor<'a>, n: i32, ctx: Context) -> Parse<'a, Node> {
        let start = cur.position();
        if at_explicit_flow_key(cur) {
            let after_q = cur.bump();
            if let Parse::Success((), at_key) = self.separate(after_q, n, ctx) {
                match self.flow_keyed_entry(at_key, n, ctx, true) {
                    Parse::Success((key, value), after) => {
                        return Parse::Success(pair_node(key, value, start, after), after);
                    }
                    Parse::Error(e) => return Parse::Error(e),
                    Parse::Failure(_) => {}
                }
            }
            let empty = Node::empty(after_q.span_here());
            return Parse::Success(
                pair_node(empty.clone(), empty, start, after_q),
                after_q,
            );
        }
        match self.flow_keyed_entry(cur, n, ctx, true) {
            Parse::Success((key, value), after) => {
                Parse::Success(pair_node(key, value, start, after), after)
            }
            Parse::Error(e) => Parse::Error(e),
            Parse::Failure(_) => self.flow_node(cur, n, ctx),
        }
    }

    /// A mapping entry: explicit (`? …`), or keyed/empty-key implicit.
    fn flow_map_entry<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, (Node, Node)> {
        if at_explicit_flow_key(cur) {
            let after_q = cur.bump();
            if let Parse::Success((), at_key) = self.separate(after_q, n, ctx) {
                match self.flow_keyed_entry(at_key, n, ctx, false) {
                    Parse::Failure(_) => {}
                    other => return other,
                }
            }
            let empty = Node::empty(after_q.span_here());
            return Parse::Success((empty.clone(), empty), after_q);
        }
        self.flow_keyed_entry(cur, n, ctx, false)
    }

    /// The shared keyed-entry form: `key [sep] : value`, an empty-key
    /// `: value`, or (in mappings only) a key with an omitted value.
    ///
    /// `require_colon` distinguishes sequence pairs (a lone node is not an
    /// entry) from mapping entries (`{a}` is a key with a null value).
    fn flow_keyed_entry<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
        require_colon: bool,
    ) -> Parse<'a, (Node, Node)> {
        // Empty key: `:` not followed by a plain-safe character.
        if cur.peek() == Some(':') && !cur.peek_at(1).is_some_and(|c| ctx.plain_safe(c)) {
            let key = Node::empty(cur.span_here());
            return self
                .flow_colon_value(cur, n, ctx, false)
                .map(|value| (key, value));
        }

        let (key, after_key) = match self.flow_node(cur, 0, Context::FlowKey) {
            Parse::Success(key, after) => (key, after),
            Parse::Failure(e) => return Parse::Failure(e),
            Parse::Error(e) => return Parse::Error(e),
        };
        let json = is_json_like(&key);

        // The `:` may follow a separation, which can cross lines.
        let at_colon = match self.separate(after_key, n, ctx) {
            Parse::Success((), c) => c,
            _ => after_key,
        };
        let colon_ok = at_colon.peek() == Some(':')
            && (json || !at_colon.peek_at(1).is_some_and(|c| ctx.plain_safe(c)));
        if !colon_ok {
            if require_colon {
                return self.fail(ErrorKind::MissingColon, at_colon.span_here());
            }
            // A mapping entry with an omitted value.
            let value = Node::empty(after_key.span_here());
            return Parse::Success((key, value), after_key);
        }
        if key.span.len() > MAX_IMPLICIT_KEY_LEN {
            return self.abort_unless_key(ctx, ErrorKind::KeyTooLong, key.span);
        }
        self.flow_colon_value(at_colon, n, ctx, json)
            .map(|value| (key, value))
    }

    /// The value after an entry's `:` (which the cursor sits on): a
    /// separated flow node, an adjacent node after a JSON-like key, or an
    /// empty node.
    fn flow_colon_value<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
        json_key: bool,
    ) -> Parse<'a, Node> {
        let after_colon = cur.bump();
        if let Parse::Success((), at_value) = self.separate(after_colon, n, ctx) {
            match self.flow_node(at_value, n, ctx) {
                Parse::Failure(_) => {}
                other => return other,
            }
        }
        if json_key {
            match self.flow_node(after_colon, n, ctx) {
                Parse::Failure(_) => {}
                other => return other,
            }
        }
        Parse::Success(Node::empty(after_colon.span_here()), after_colon)
    }

    /// Optional separation: returns the cursor past it, or unchanged.
    fn skip_separation<'a>(&self, cur: Cursor<'a>, n: i32, ctx: Context) -> Cursor<'a> {
        match self.separate(cur, n, ctx) {
            Parse::Success((), after) => after,
            _ => cur,
        }
    }
}

/// Wrap a key/value pair from a flow sequence into a single-pair mapping.
fn pair_node(key: Node, value: Node, start: crate::span::Position, end: Cursor<'_>) -> Node {
    let span = Span::new(start, end.position());
    Node::new(
        Value::Mapping {
            style: CollectionStyle::Flow,
            entries: vec![(key, value)],
        },
        span,
    )
}
