// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Scalar parsing: plain, quoted, and block scalars.
//!
//! All four multi-line forms normalize their content here: interior breaks
//! become `\n`, folding turns single breaks into spaces, chomping trims or
//! keeps trailing breaks, and escapes decode to their target characters.
//! The returned strings are the normalized content, never source slices.

use crate::chars;
use crate::cursor::Cursor;
use crate::error::ErrorKind;
use crate::scan;
use crate::tree::{Node, ScalarStyle, Value};

use super::{Context, Parse, Parser};

/// Block scalar chomping indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Chomping {
    /// `-`: drop the final break and any trailing empty lines.
    Strip,
    /// Default: keep a single final line feed, drop further empty lines.
    #[default]
    Clip,
    /// `+`: preserve the final break and all trailing empty lines.
    Keep,
}

impl Parser {
    /// Parse a plain (unquoted) scalar at indentation `n` in context `ctx`.
    ///
    /// Plain scalars have the strictest character rules of any style: the
    /// first character may not be an indicator (except `-?:` followed by a
    /// safe character), `: ` and ` #` end the scalar, and in flow contexts
    /// the flow indicators do too. In key contexts the scalar is confined
    /// to a single line; otherwise continuation lines are folded.
    pub(crate) fn plain_scalar<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        let start = cur.position();
        if cur.at_document_marker() {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        }
        let Some(first) = cur.peek() else {
            return self.fail(ErrorKind::UnexpectedEof, cur.span_here());
        };
        let first_ok = if chars::is_indicator(first) {
            matches!(first, '-' | '?' | ':')
                && cur.peek_at(1).is_some_and(|next| ctx.plain_safe(next))
        } else {
            chars::is_ns_char(first)
        };
        if !first_ok {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        }

        let mut value = String::new();
        let mut pending = String::new();
        let mut cur = cur;
        // Cursor just past the last content character; separation after the
        // scalar belongs to the caller.
        let mut end = cur;

        'lines: loop {
            // Consume one line of plain content.
            loop {
                match cur.peek() {
                    None => break 'lines,
                    Some(c) if chars::is_white(c) => {
                        pending.push(c);
                        cur = cur.bump();
                    }
                    Some(c) if chars::is_break(c) => break,
                    Some(':') => {
                        if cur.peek_at(1).is_some_and(|next| ctx.plain_safe(next)) {
                            value.push_str(&pending);
                            pending.clear();
                            value.push(':');
                            cur = cur.bump();
                            end = cur;
                        } else {
                            break 'lines;
                        }
                    }
                    Some('#') if !pending.is_empty() => break 'lines,
                    Some(c) if ctx.plain_safe(c) => {
                        value.push_str(&pending);
                        pending.clear();
                        value.push(c);
                        cur = cur.bump();
                        end = cur;
                    }
                    Some(c) if !chars::is_printable(c) => {
                        return self.abort_unless_key(
                            ctx,
                            ErrorKind::NonPrintableCharacter,
                            cur.span_here(),
                        );
                    }
                    Some(_) => break 'lines,
                }
            }
            if ctx.is_key() {
                break;
            }

            // Attempt a folded continuation line.
            let Parse::Success(fold, next) = self.flow_fold(cur, n.max(0), false) else {
                break;
            };
            let Some(c) = next.peek() else { break };
            // A column-0 `%` is reserved for directives; stopping here lets
            // the stream layer report a missing `...` instead of silently
            // folding a directive into the scalar.
            if next.position().column == 0 && c == '%' {
                break;
            }
            let continues = match c {
                ':' => next.peek_at(1).is_some_and(|c2| ctx.plain_safe(c2)),
                '#' => false,
                c if !chars::is_printable(c) => {
                    return self.abort(ErrorKind::NonPrintableCharacter, next.span_here());
                }
                c => ctx.plain_safe(c),
            };
            if !continues {
                break;
            }
            value.push_str(&fold);
            pending.clear();
            cur = next;
        }

        if value.is_empty() {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        }
        let span = end.span_from(start);
        Parse::Success(
            Node::new(Value::scalar(value, ScalarStyle::Plain), span),
            end,
        )
    }

    /// Parse a single-quoted scalar. The only escape is `''` for a quote.
    pub(crate) fn single_quoted<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        let start = cur.position();
        let Some(mut cur) = cur.eat_char('\'') else {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        };
        let mut value = String::new();
        let mut pending = String::new();

        loop {
            match cur.peek() {
                None => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::UnterminatedScalar,
                        cur.span_from(start),
                    );
                }
                Some('\'') => {
                    if cur.peek_at(1) == Some('\'') {
                        value.push_str(&pending);
                        pending.clear();
                        value.push('\'');
                        cur = cur.advance(2);
                    } else {
                        value.push_str(&pending);
                        cur = cur.bump();
                        let span = cur.span_from(start);
                        return Parse::Success(
                            Node::new(Value::scalar(value, ScalarStyle::SingleQuoted), span),
                            cur,
                        );
                    }
                }
                Some(c) if chars::is_break(c) => {
                    if ctx.is_key() {
                        return self.fail(ErrorKind::MultilineImplicitKey, cur.span_here());
                    }
                    pending.clear();
                    match self.flow_fold(cur, n.max(0), false) {
                        Parse::Success(fold, next) => {
                            value.push_str(&fold);
                            cur = next;
                        }
                        Parse::Failure(e) | Parse::Error(e) => {
                            return self.quoted_fold_error(e, start);
                        }
                    }
                }
                Some(c) if chars::is_white(c) => {
                    pending.push(c);
                    cur = cur.bump();
                }
                Some(c) if !chars::is_printable(c) => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::NonPrintableCharacter,
                        cur.span_here(),
                    );
                }
                Some(c) => {
                    value.push_str(&pending);
                    pending.clear();
                    value.push(c);
                    cur = cur.bump();
                }
            }
        }
    }

    /// Parse a double-quoted scalar, decoding escapes.
    pub(crate) fn double_quoted<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        ctx: Context,
    ) -> Parse<'a, Node> {
        let start = cur.position();
        let Some(mut cur) = cur.eat_char('"') else {
            return self.fail(ErrorKind::InvalidCharacter, cur.span_here());
        };
        let mut value = String::new();
        let mut pending = String::new();

        loop {
            match cur.peek() {
                None => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::UnterminatedScalar,
                        cur.span_from(start),
                    );
                }
                Some('"') => {
                    value.push_str(&pending);
                    cur = cur.bump();
                    let span = cur.span_from(start);
                    return Parse::Success(
                        Node::new(Value::scalar(value, ScalarStyle::DoubleQuoted), span),
                        cur,
                    );
                }
                Some('\\') => match cur.peek_at(1) {
                    None => {
                        return self.abort_unless_key(
                            ctx,
                            ErrorKind::UnterminatedScalar,
                            cur.span_from(start),
                        );
                    }
                    Some(b) if chars::is_break(b) => {
                        // Escaped line continuation: the break is suppressed
                        // and the whitespace before the backslash is kept.
                        if ctx.is_key() {
                            return self.fail(ErrorKind::MultilineImplicitKey, cur.span_here());
                        }
                        value.push_str(&pending);
                        pending.clear();
                        match self.flow_fold(cur.bump(), n.max(0), true) {
                            Parse::Success(fold, next) => {
                                value.push_str(&fold);
                                cur = next;
                            }
                            Parse::Failure(e) | Parse::Error(e) => {
                                return self.quoted_fold_error(e, start);
                            }
                        }
                    }
                    Some(esc) => {
                        value.push_str(&pending);
                        pending.clear();
                        match self.decode_escape(cur, esc, ctx) {
                            Parse::Success(decoded, next) => {
                                value.push(decoded);
                                cur = next;
                            }
                            Parse::Failure(e) => return Parse::Failure(e),
                            Parse::Error(e) => return Parse::Error(e),
                        }
                    }
                },
                Some(c) if chars::is_break(c) => {
                    if ctx.is_key() {
                        return self.fail(ErrorKind::MultilineImplicitKey, cur.span_here());
                    }
                    pending.clear();
                    match self.flow_fold(cur, n.max(0), false) {
                        Parse::Success(fold, next) => {
                            value.push_str(&fold);
                            cur = next;
                        }
                        Parse::Failure(e) | Parse::Error(e) => {
                            return self.quoted_fold_error(e, start);
                        }
                    }
                }
                Some(c) if chars::is_white(c) => {
                    pending.push(c);
                    cur = cur.bump();
                }
                Some(c) if !chars::is_printable(c) => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::NonPrintableCharacter,
                        cur.span_here(),
                    );
                }
                Some(c) => {
                    value.push_str(&pending);
                    pending.clear();
                    value.push(c);
                    cur = cur.bump();
                }
            }
        }
    }

    /// Decode one escape sequence. The cursor sits on the backslash and
    /// `esc` is the character after it.
    fn decode_escape<'a>(
        &self,
        cur: Cursor<'a>,
        esc: char,
        ctx: Context,
    ) -> Parse<'a, char> {
        let start = cur.position();
        let after = cur.advance(2);
        let decoded = match esc {
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            't' | '\t' => '\t',
            'n' => '\n',
            'v' => '\u{B}',
            'f' => '\u{C}',
            'r' => '\r',
            'e' => '\u{1B}',
            ' ' => ' ',
            '"' => '"',
            '/' => '/',
            '\\' => '\\',
            'N' => '\u{85}',
            '_' => '\u{A0}',
            'L' => '\u{2028}',
            'P' => '\u{2029}',
            'x' => return self.decode_hex_escape(after, 'x', 2, start, ctx),
            'u' => return self.decode_hex_escape(after, 'u', 4, start, ctx),
            'U' => return self.decode_hex_escape(after, 'U', 8, start, ctx),
            other => {
                return self.abort_unless_key(
                    ctx,
                    ErrorKind::InvalidEscape(other),
                    after.span_from(start),
                );
            }
        };
        Parse::Success(decoded, after)
    }

    /// Decode the `expected`-digit hex payload of a `\x`/`\u`/`\U` escape.
    fn decode_hex_escape<'a>(
        &self,
        cur: Cursor<'a>,
        escape: char,
        expected: usize,
        start: crate::span::Position,
        ctx: Context,
    ) -> Parse<'a, char> {
        let mut cur = cur;
        let mut code = 0_u32;
        for _ in 0..expected {
            match cur.peek() {
                Some(h) if chars::is_hex_digit(h) => {
                    code = code * 16 + chars::as_hex(h);
                    cur = cur.bump();
                }
                _ => {
                    return self.abort_unless_key(
                        ctx,
                        ErrorKind::BadHexEscape { escape, expected },
                        cur.bump().span_from(start),
                    );
                }
            }
        }
        match char::from_u32(code) {
            Some(decoded) => Parse::Success(decoded, cur),
            None => self.abort_unless_key(
                ctx,
                ErrorKind::EscapeOutOfRange(code),
                cur.span_from(start),
            ),
        }
    }

    /// Convert a folding failure inside a quoted scalar into a hard error.
    ///
    /// An unterminated fold (end of input) is reported as the scalar being
    /// unterminated; indentation and document-marker problems keep their
    /// own kinds.
    fn quoted_fold_error<'a, T>(
        &self,
        e: crate::error::ParseError,
        start: crate::span::Position,
    ) -> Parse<'a, T> {
        let kind = match e.kind {
            ErrorKind::UnexpectedEof => ErrorKind::UnterminatedScalar,
            other => other,
        };
        let span = if kind == ErrorKind::UnterminatedScalar {
            crate::span::Span::new(start, e.span.end)
        } else {
            e.span
        };
        Parse::Error(crate::error::ParseError::new(kind, span))
    }

    /// Fold a line break inside a flow scalar.
    ///
    /// The cursor must sit on a break. Consumes the break, any following
    /// empty lines, and the continuation line's prefix, returning the
    /// folded contribution: a single space for a plain break, one `\n` per
    /// empty line otherwise (nothing for an escaped break). The returned
    /// cursor sits on the first content character of the continuation line.
    ///
    /// Fails (recoverably) at end of input, at a document marker, and when
    /// the continuation line is indented less than `n`.
    fn flow_fold<'a>(&self, cur: Cursor<'a>, n: i32, escaped: bool) -> Parse<'a, String> {
        let Some(mut cur) = cur.eat_break() else {
            return self.fail(ErrorKind::UnexpectedEof, cur.span_here());
        };
        let mut empties = 0_usize;
        loop {
            if cur.is_eof() {
                return self.fail(ErrorKind::UnexpectedEof, cur.span_here());
            }
            if cur.at_document_marker() {
                return self.fail(ErrorKind::DocumentMarkerInScalar, cur.span_here());
            }
            let line_start = cur.position();
            let (spaces, after_spaces) = scan::count_spaces(cur);
            let (_, after_white) = after_spaces.eat_while(chars::is_white);
            if after_white.is_eof() {
                return self.fail(ErrorKind::UnexpectedEof, after_white.span_here());
            }
            if let Some(next) = after_white.eat_break() {
                empties += 1;
                cur = next;
                continue;
            }
            if (spaces as i32) < n {
                return self.fail(
                    ErrorKind::InvalidIndentationContext {
                        expected: n.max(0) as usize,
                        found: spaces,
                    },
                    after_spaces.span_from(line_start),
                );
            }
            let fold = if empties > 0 {
                "\n".repeat(empties)
            } else if escaped {
                String::new()
            } else {
                " ".to_owned()
            };
            return Parse::Success(fold, after_white);
        }
    }

    /// Parse a block scalar. The cursor sits on the `|` or `>` indicator;
    /// `n` is the indentation of the parent node.
    pub(crate) fn block_scalar<'a>(
        &mut self,
        cur: Cursor<'a>,
        n: i32,
        literal: bool,
    ) -> Parse<'a, Node> {
        let start = cur.position();
        let mut cur = cur.bump();

        // Header: indentation indicator and chomping indicator, either order.
        let mut explicit_indent: Option<u32> = None;
        let mut chomping: Option<Chomping> = None;
        loop {
            match cur.peek() {
                Some('0') => {
                    return self.abort(
                        ErrorKind::ZeroIndentationIndicator,
                        cur.bump().span_from(cur.position()),
                    );
                }
                Some(d) if d.is_ascii_digit() && explicit_indent.is_none() => {
                    explicit_indent = Some(chars::as_hex(d));
                    cur = cur.bump();
                }
                Some('-') if chomping.is_none() => {
                    chomping = Some(Chomping::Strip);
                    cur = cur.bump();
                }
                Some('+') if chomping.is_none() => {
                    chomping = Some(Chomping::Keep);
                    cur = cur.bump();
                }
                _ => break,
            }
        }
        let chomping = chomping.unwrap_or_default();
        let Some(mut cur) = scan::line_trailer(cur) else {
            return self.abort(ErrorKind::InvalidBlockScalarHeader, cur.span_from(start));
        };

        // Content: collected line by line. `base` is the content indentation
        // (parent indentation plus the indicator, or auto-detected from the
        // first non-empty line).
        let mut base: Option<usize> = explicit_indent.map(|m| (n + m as i32).max(0) as usize);
        let mut leading_empties: Vec<(usize, crate::span::Span)> = Vec::new();
        let mut lines: Vec<String> = Vec::new();
        let mut final_break = false;

        loop {
            if cur.is_eof() || cur.at_document_marker() {
                break;
            }
            let line_start = cur.position();
            let (w, after_spaces) = scan::count_spaces(cur);
            let (_, after_white) = after_spaces.eat_while(chars::is_white);

            if after_white.at_break_or_eof() && base.is_none_or(|b| w <= b) {
                // An empty line (no content beyond whitespace).
                if base.is_none() {
                    leading_empties.push((w, after_spaces.span_from(line_start)));
                }
                let Some(next) = after_white.eat_break() else {
                    break; // whitespace then end of input
                };
                lines.push(String::new());
                final_break = true;
                cur = next;
                continue;
            }

            if base.is_none() {
                if w as i32 <= n {
                    break; // no content at all: the scalar is empty
                }
                for (depth, span) in &leading_empties {
                    if *depth > w {
                        return self.abort(ErrorKind::LeadingEmptyLineTooDeep, *span);
                    }
                }
                base = Some(w);
            }
            let b = base.unwrap_or(0);
            if w < b {
                break; // less indented: the scalar ends before this line
            }

            // A content line: everything past the base indentation, verbatim.
            let mut c = cur.advance(b);
            let mut text = String::new();
            while let Some(ch) = c.peek() {
                if chars::is_break(ch) {
                    break;
                }
                if !chars::is_printable(ch) {
                    return self.abort(ErrorKind::NonPrintableCharacter, c.span_here());
                }
                text.push(ch);
                c = c.bump();
            }
            lines.push(text);
            match c.eat_break() {
                Some(next) => {
                    final_break = true;
                    cur = next;
                }
                None => {
                    final_break = false;
                    cur = c;
                }
            }
        }
        let end = cur.position();
        // Trailing comment lines below the content belong to the scalar.
        let cur = scan::comment_lines(cur);

        let value = assemble_block_scalar(lines, literal, chomping, final_break);
        let style = if literal {
            ScalarStyle::Literal
        } else {
            ScalarStyle::Folded
        };
        Parse::Success(
            Node::new(
                Value::scalar(value, style),
                crate::span::Span::new(start, end),
            ),
            cur,
        )
    }
}

/// Join collected block-scalar lines per the style and chomping rules.
fn assemble_block_scalar(
    mut lines: Vec<String>,
    literal: bool,
    chomping: Chomping,
    final_break: bool,
) -> String {
    let mut trailing = 0_usize;
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
        trailing += 1;
    }

    if lines.is_empty() {
        return match chomping {
            Chomping::Keep => "\n".repeat(trailing),
            Chomping::Strip | Chomping::Clip => String::new(),
        };
    }

    let body = if literal {
        lines.join("\n")
    } else {
        fold_lines(&lines)
    };
    // If trailing empty lines were collected, the last content line
    // necessarily ended with a break.
    let has_final_break = trailing > 0 || final_break;
    match chomping {
        Chomping::Strip => body,
        Chomping::Clip => {
            if has_final_break {
                body + "\n"
            } else {
                body
            }
        }
        Chomping::Keep => {
            let breaks = trailing + usize::from(has_final_break);
            body + &"\n".repeat(breaks)
        }
    }
}

/// Fold the content lines of a `>` scalar.
///
/// Adjacent text lines join with a space; empty lines become line feeds;
/// breaks next to more-indented lines stay literal, and the more-indented
/// lines keep their extra indentation.
fn fold_lines(lines: &[String]) -> String {
    let mut out = String::new();
    let mut prev_text = false;
    let mut empties = 0_usize;
    let mut first = true;
    for line in lines {
        if line.is_empty() {
            empties += 1;
            continue;
        }
        let is_text = !line.starts_with([' ', '\t']);
        if first {
            for _ in 0..empties {
                out.push('\n');
            }
            first = false;
        } else if prev_text && is_text {
            if empties == 0 {
                out.push(' ');
            } else {
                for _ in 0..empties {
                    out.push('\n');
                }
            }
        } else {
            for _ in 0..=empties {
                out.push('\n');
            }
        }
        out.push_str(line);
        prev_text = is_text;
        empties = 0;
    }
    out
}
