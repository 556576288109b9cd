// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! The grammar engine.
//!
//! YAML's productions are parameterized by an indentation `n` and a context
//! `c`; each production here is a method `fn rule(&mut self, cur, n, ctx)`
//! returning a [`Parse`] outcome. Backtracking is by cursor snapshot: a
//! production receives its cursor by value, and a caller that sees
//! [`Parse::Failure`] simply reuses the cursor it still holds. A
//! [`Parse::Error`] means a committing prefix matched and then a hard
//! constraint was violated; callers must not try alternatives past it.
//!
//! Whitespace is never skipped implicitly — YAML is whitespace-significant,
//! so every production consumes exactly what its rule covers.

mod block;
mod document;
mod flow;
mod scalar;

use std::collections::HashMap;

use crate::chars;
use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError, Warning, WarningKind};
use crate::scan;
use crate::span::{Span, Spanned};
use crate::tree::{Node, Tag};
use crate::uri;

pub(crate) use document::parse_stream;

/// The outcome of a parsing operation.
pub(crate) enum Parse<'a, T> {
    /// Matched: the value, plus the cursor past the consumed input.
    Success(T, Cursor<'a>),
    /// No match at this position; the caller may try an alternative.
    Failure(ParseError),
    /// A committing prefix matched but a hard constraint was violated;
    /// alternatives must not be tried.
    Error(ParseError),
}

impl<'a, T> Parse<'a, T> {
    /// Transform the value of a `Success`.
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Parse<'a, U> {
        match self {
            Parse::Success(value, cur) => Parse::Success(f(value), cur),
            Parse::Failure(e) => Parse::Failure(e),
            Parse::Error(e) => Parse::Error(e),
        }
    }
}

/// The context a production is being evaluated in.
///
/// YAML productions differ between block and flow contexts, and between
/// regular content and single-line implicit keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Inside a block sequence entry.
    BlockIn,
    /// Outside a block sequence entry (block mapping values).
    BlockOut,
    /// Inside a flow collection.
    FlowIn,
    /// A flow node outside any flow collection.
    FlowOut,
    /// An implicit key in block context.
    BlockKey,
    /// An implicit key in flow context.
    FlowKey,
}

impl Context {
    /// The context for content nested inside a flow collection.
    pub(crate) fn in_flow(self) -> Self {
        match self {
            Self::FlowOut | Self::FlowIn | Self::BlockIn | Self::BlockOut => Self::FlowIn,
            Self::BlockKey | Self::FlowKey => Self::FlowKey,
        }
    }

    /// Implicit-key contexts restrict content to a single line.
    pub(crate) fn is_key(self) -> bool {
        matches!(self, Self::BlockKey | Self::FlowKey)
    }

    /// Check whether `c` is safe inside a plain scalar in this context.
    ///
    /// Inside flow collections (and flow keys) the flow indicators `,[]{}`
    /// would be ambiguous and are excluded.
    pub(crate) fn plain_safe(self, c: char) -> bool {
        match self {
            Self::FlowIn | Self::FlowKey => chars::is_ns_char(c) && !chars::is_flow_indicator(c),
            _ => chars::is_ns_char(c),
        }
    }
}

/// The maximum length of an implicit key, in code points.
pub(crate) const MAX_IMPLICIT_KEY_LEN: usize = 1024;

/// Pending node properties (anchor, tag) collected before parsing the value.
///
/// The grammar allows the two properties in either order, at most one of
/// each.
#[derive(Debug, Default)]
pub(crate) struct NodeProperties {
    pub anchor: Option<Spanned<String>>,
    pub tag: Option<Spanned<Tag>>,
}

impl NodeProperties {
    pub(crate) fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.tag.is_none()
    }

    /// Apply these properties to a node, extending its span to cover them.
    pub(crate) fn apply_to(self, mut node: Node) -> Node {
        if let Some((anchor, span)) = self.anchor {
            node.anchor = Some(anchor);
            node.span = node.span.join(span);
        }
        if let Some((tag, span)) = self.tag {
            node.tag = Some(tag);
            node.span = node.span.join(span);
        }
        node
    }
}

/// Document-scoped parser state.
///
/// A fresh `Parser` is created for every document in the stream: tag-handle
/// bindings reset to the defaults and warnings accumulate per document.
/// All position state lives in the cursors the productions pass around.
pub(crate) struct Parser {
    /// Active `%TAG` bindings, reset per document.
    tag_handles: HashMap<String, String>,
    /// Non-fatal diagnostics for the current document.
    pub(crate) warnings: Vec<Warning>,
}

impl Parser {
    pub(crate) fn new() -> Self {
        let mut tag_handles = HashMap::new();
        tag_handles.insert("!".to_owned(), "!".to_owned());
        tag_handles.insert("!!".to_owned(), "tag:yaml.org,2002:".to_owned());
        Self {
            tag_handles,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn warn(&mut self, kind: WarningKind, span: Span) {
        self.warnings.push(Warning { kind, span });
    }

    /// Build a recoverable `Failure`.
    pub(crate) fn fail<'a, T>(&self, kind: ErrorKind, span: Span) -> Parse<'a, T> {
        Parse::Failure(ParseError::new(kind, span))
    }

    /// Build a committed `Error`.
    pub(crate) fn abort<'a, T>(&self, kind: ErrorKind, span: Span) -> Parse<'a, T> {
        Parse::Error(ParseError::new(kind, span))
    }

    /// Build an `Error`, downgraded to `Failure` in key contexts.
    ///
    /// Implicit-key lookahead must stay backtrackable: a construct that is a
    /// hard error as a node may simply mean "this line is not an implicit
    /// key" when probed in a key context.
    pub(crate) fn abort_unless_key<'a, T>(
        &self,
        ctx: Context,
        kind: ErrorKind,
        span: Span,
    ) -> Parse<'a, T> {
        if ctx.is_key() {
            Parse::Failure(ParseError::new(kind, span))
        } else {
            Parse::Error(ParseError::new(kind, span))
        }
    }

    /// `s-separate(n, c)`: the separation required between tokens.
    ///
    /// In key contexts separation may not cross a line boundary; elsewhere
    /// it may continue onto further lines via comments plus a line prefix of
    /// at least `n` spaces.
    pub(crate) fn separate<'a>(&self, cur: Cursor<'a>, n: i32, ctx: Context) -> Parse<'a, ()> {
        if ctx.is_key() {
            return match scan::separate_in_line(cur) {
                Some(after) => Parse::Success((), after),
                None => self.fail(ErrorKind::InvalidCharacter, cur.span_here()),
            };
        }
        if let Some(after) = scan::trailing_comments(cur) {
            if after.is_eof() {
                return Parse::Success((), after);
            }
            if let Some(after) = scan::indent_exact(after, n) {
                let (_, after) = after.eat_while(chars::is_white);
                return Parse::Success((), after);
            }
        }
        match scan::separate_in_line(cur) {
            Some(after) => Parse::Success((), after),
            None => self.fail(ErrorKind::InvalidCharacter, cur.span_here()),
        }
    }

    /// Parse node properties: `tag [anchor]` or `anchor [tag]`.
    pub(crate) fn node_properties<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, NodeProperties> {
        let mut props = NodeProperties::default();
        let cur = match cur.peek() {
            Some('!') => match self.tag_property(cur) {
                Parse::Success(tag, after) => {
                    props.tag = Some(tag);
                    after
                }
                Parse::Failure(e) => return Parse::Failure(e),
                Parse::Error(e) => return Parse::Error(e),
            },
            Some('&') => match self.anchor_property(cur) {
                Parse::Success(anchor, after) => {
                    props.anchor = Some(anchor);
                    after
                }
                Parse::Failure(e) => return Parse::Failure(e),
                Parse::Error(e) => return Parse::Error(e),
            },
            _ => return self.fail(ErrorKind::InvalidCharacter, cur.span_here()),
        };

        // The second property, if present, sits after a separation.
        if let Parse::Success((), after_sep) = self.separate(cur, n, ctx) {
            match (after_sep.peek(), props.tag.is_some(), props.anchor.is_some()) {
                (Some('&'), true, false) => {
                    if let Parse::Success(anchor, after) = self.anchor_property(after_sep) {
                        props.anchor = Some(anchor);
                        return Parse::Success(props, after);
                    }
                }
                (Some('!'), false, true) => match self.tag_property(after_sep) {
                    Parse::Success(tag, after) => {
                        props.tag = Some(tag);
                        return Parse::Success(props, after);
                    }
                    Parse::Error(e) => return Parse::Error(e),
                    Parse::Failure(_) => {}
                },
                _ => {}
            }
        }
        Parse::Success(props, cur)
    }

    /// Parse an anchor property: `&name`.
    fn anchor_property<'a>(&self, cur: Cursor<'a>) -> Parse<'a, Spanned<String>> {
        let start = cur.position();
        let Some(cur_after) = cur.eat_char('&') else {
            return self.fail(ErrorKind::InvalidAnchor, cur.span_here());
        };
        let (count, after) = cur_after.eat_while(chars::is_anchor_char);
        if count == 0 {
            return self.abort(ErrorKind::InvalidAnchor, after.span_from(start));
        }
        let name = self.slice_to_string(cur_after, count);
        Parse::Success((name, after.span_from(start)), after)
    }

    /// Parse a tag property: verbatim `!<uri>`, shorthand `!suffix`,
    /// `!!suffix`, `!handle!suffix`, or the non-specific tag `!`.
    fn tag_property<'a>(&self, cur: Cursor<'a>) -> Parse<'a, Spanned<Tag>> {
        let start = cur.position();
        let Some(after_bang) = cur.eat_char('!') else {
            return self.fail(ErrorKind::InvalidTag, cur.span_here());
        };

        // Verbatim tag: !<uri>
        if let Some(inner) = after_bang.eat_char('<') {
            let (count, after_uri) = inner.eat_while(chars::is_uri_char);
            let uri = self.slice_to_string(inner, count);
            let Some(after) = after_uri.eat_char('>') else {
                return self.abort(ErrorKind::InvalidTag, after_uri.span_from(start));
            };
            let span = after.span_from(start);
            if !verbatim_tag_is_valid(&uri) {
                return self.abort(ErrorKind::InvalidTag, span);
            }
            return Parse::Success((Tag::Verbatim(uri), span), after);
        }

        // Secondary handle: !!suffix
        if let Some(after_second) = after_bang.eat_char('!') {
            return self.shorthand_tag(after_second, "!!".to_owned(), start);
        }

        // A run of tag characters: either the suffix of the primary handle,
        // or (when followed by `!`) the name of a named handle.
        let (count, after_body) = after_bang.eat_while(chars::is_tag_char);
        let body = self.slice_to_string(after_bang, count);
        if after_body.peek() == Some('!') {
            if count == 0 || !body.chars().all(chars::is_word_char) {
                return self.abort(ErrorKind::InvalidTag, after_body.bump().span_from(start));
            }
            let handle = format!("!{body}!");
            return self.shorthand_tag(after_body.bump(), handle, start);
        }
        if count == 0 {
            // Bare `!`: the non-specific tag.
            return Parse::Success((Tag::NonSpecific, after_bang.span_from(start)), after_bang);
        }
        let span = after_body.span_from(start);
        match self.checked_shorthand("!".to_owned(), body, span) {
            Ok(tag) => Parse::Success((tag, span), after_body),
            Err(e) => Parse::Error(e),
        }
    }

    /// Parse the suffix of a `!!` or `!name!` shorthand and validate it.
    fn shorthand_tag<'a>(
        &self,
        cur: Cursor<'a>,
        handle: String,
        start: crate::span::Position,
    ) -> Parse<'a, Spanned<Tag>> {
        let (count, after) = cur.eat_while(chars::is_tag_char);
        let span = after.span_from(start);
        if count == 0 {
            return self.abort(ErrorKind::InvalidTag, span);
        }
        let suffix = self.slice_to_string(cur, count);
        match self.checked_shorthand(handle, suffix, span) {
            Ok(tag) => Parse::Success((tag, span), after),
            Err(e) => Parse::Error(e),
        }
    }

    /// Validate a shorthand tag: the handle must be declared and the
    /// resolved tag must be a local tag or a valid absolute URI.
    fn checked_shorthand(
        &self,
        handle: String,
        suffix: String,
        span: Span,
    ) -> Result<Tag, ParseError> {
        // Escapes must decode cleanly (well-formed %HH, valid UTF-8).
        if uri::percent_decode(&suffix).is_none() {
            return Err(ParseError::new(ErrorKind::InvalidTag, span));
        }
        let Some(prefix) = self.tag_handles.get(&handle) else {
            return Err(ParseError::new(ErrorKind::UndefinedTagHandle(handle), span));
        };
        if !prefix.starts_with('!') && !uri::is_absolute_uri(&format!("{prefix}{suffix}")) {
            return Err(ParseError::new(ErrorKind::InvalidTag, span));
        }
        Ok(Tag::Shorthand { handle, suffix })
    }

    /// Bind a `%TAG` handle, returning `false` if it was already bound.
    pub(crate) fn bind_tag_handle(&mut self, handle: String, prefix: String) -> bool {
        // The defaults for ! and !! don't count as prior bindings.
        let is_default = matches!(
            (handle.as_str(), self.tag_handles.get(&handle)),
            ("!", Some(p)) if p == "!"
        ) || matches!(
            (handle.as_str(), self.tag_handles.get(&handle)),
            ("!!", Some(p)) if p == "tag:yaml.org,2002:"
        );
        let fresh = is_default || !self.tag_handles.contains_key(&handle);
        self.tag_handles.insert(handle, prefix);
        fresh
    }

    /// Collect `count` characters starting at `cur` into an owned string.
    pub(crate) fn slice_to_string(&self, cur: Cursor<'_>, count: usize) -> String {
        let mut out = String::with_capacity(count);
        let mut cur = cur;
        for _ in 0..count {
            if let Some(c) = cur.peek() {
                out.push(c);
                cur = cur.bump();
            }
        }
        out
    }
}

/// A verbatim tag must be a local tag (`!` plus at least one character) or
/// a valid absolute URI. A bare `!` is invalid: verbatim tags are never
/// subject to resolution, so there is nothing a lone `!` could mean.
fn verbatim_tag_is_valid(tag: &str) -> bool {
    if let Some(rest) = tag.strip_prefix('!') {
        !rest.is_empty() && uri::percent_decode(rest).is_some()
    } else {
        uri::is_absolute_uri(tag) && uri::percent_decode(tag).is_some()
    }
}
