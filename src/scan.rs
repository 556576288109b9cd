// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Low-level scanners shared by the grammar productions.
//!
//! These recognize the whitespace-and-comment layer of YAML: structural
//! indentation, in-line separation, comment text and comment lines. They
//! return `Option<Cursor>` (match / no match); hard errors are decided by
//! the productions that call them.

use crate::chars;
use crate::cursor::Cursor;
use crate::span::Span;

/// Count the run of space characters at the cursor.
pub(crate) fn count_spaces(cur: Cursor<'_>) -> (usize, Cursor<'_>) {
    cur.eat_while(|c| c == ' ')
}

/// Consume exactly `n` spaces of structural indentation.
///
/// `n` may be negative (the virtual indentation of a top-level node), in
/// which case this is a zero-width match. Tabs never count.
pub(crate) fn indent_exact(cur: Cursor<'_>, n: i32) -> Option<Cursor<'_>> {
    let mut cur = cur;
    for _ in 0..n.max(0) {
        cur = cur.eat_char(' ')?;
    }
    Some(cur)
}

/// Consume one-or-more whitespace characters, or match zero-width at the
/// start of a line.
pub(crate) fn separate_in_line(cur: Cursor<'_>) -> Option<Cursor<'_>> {
    let (n, after) = cur.eat_while(chars::is_white);
    if n > 0 || cur.at_line_start() {
        Some(after)
    } else {
        None
    }
}

/// Consume a comment's text: `#` followed by non-break characters.
pub(crate) fn comment_text(cur: Cursor<'_>) -> Option<Cursor<'_>> {
    let cur = cur.eat_char('#')?;
    let (_, cur) = cur.eat_while(chars::is_nb_char);
    Some(cur)
}

/// Consume the rest of the current line as an optional comment: optional
/// separation, optional comment text, then a break (consumed) or the end
/// of input. Returns `None` if non-comment content remains on the line.
pub(crate) fn line_trailer(cur: Cursor<'_>) -> Option<Cursor<'_>> {
    let (n, mut cur) = cur.eat_while(chars::is_white);
    if cur.peek() == Some('#') && (n > 0 || cur.at_line_start()) {
        cur = comment_text(cur)?;
    }
    if cur.is_eof() {
        Some(cur)
    } else {
        cur.eat_break()
    }
}

/// Consume zero or more comment lines (including blank lines).
///
/// Only applies at the start of a line; stops before the first line that
/// carries non-comment content.
pub(crate) fn comment_lines(cur: Cursor<'_>) -> Cursor<'_> {
    let mut cur = cur;
    while cur.at_line_start() && !cur.is_eof() {
        let (_, after_ws) = cur.eat_while(chars::is_white);
        let after_ws = if after_ws.peek() == Some('#') {
            match comment_text(after_ws) {
                Some(c) => c,
                None => break,
            }
        } else {
            after_ws
        };
        if after_ws.is_eof() {
            return after_ws;
        }
        match after_ws.eat_break() {
            Some(next) => cur = next,
            None => break,
        }
    }
    cur
}

/// Consume comments up to and beyond the end of the current line.
///
/// This is the `s-l-comments` production: either the remainder of the line
/// is blank or a comment (consumed along with its break), or the cursor is
/// already at the start of a line. Subsequent blank and comment lines are
/// consumed too. Returns `None` when non-comment content remains on the
/// current line.
pub(crate) fn trailing_comments(cur: Cursor<'_>) -> Option<Cursor<'_>> {
    let cur = match line_trailer(cur) {
        Some(after) => after,
        None if cur.at_line_start() => cur,
        None => return None,
    };
    Some(comment_lines(cur))
}

/// Detect a tab used as structural indentation at the start of a line.
///
/// Returns the span of the offending tab if the line has fewer than
/// `required` spaces, then a tab, then non-blank content — i.e. the line
/// visually lines up with a block structure but uses a tab to get there.
pub(crate) fn tab_in_indentation(cur: Cursor<'_>, required: usize) -> Option<Span> {
    let (n, after) = count_spaces(cur);
    if n >= required || after.peek() != Some('\t') {
        return None;
    }
    let tab_span = after.bump().span_from(after.position());
    let (_, rest) = after.eat_while(chars::is_white);
    if rest.at_break_or_eof() {
        None
    } else {
        Some(tab_span)
    }
}
