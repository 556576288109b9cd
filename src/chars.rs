// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Character-set predicates for the YAML 1.2 grammar.
//!
//! Each predicate classifies a single Unicode scalar value. The sets mirror
//! the productions of the YAML 1.2 character chapter; compound scanners
//! build on these instead of embedding their own `matches!` patterns.

/// Check whether the character may appear in a YAML stream at all.
///
/// Printable characters are tab, line feed, carriage return, the printable
/// ASCII range, NEL, and the non-surrogate Unicode planes minus the C1
/// control block.
#[inline]
#[must_use]
pub fn is_printable(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{7E}'
        | '\u{85}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Check whether the character is a line break (`\r` or `\n`).
#[inline]
#[must_use]
pub fn is_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Check whether the character is a whitespace (` ` or `\t`).
#[inline]
#[must_use]
pub fn is_white(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Check whether the character may appear inside a single line of content.
///
/// Non-break characters are the printable set minus line breaks and the
/// byte order mark.
#[inline]
#[must_use]
pub fn is_nb_char(c: char) -> bool {
    is_printable(c) && !is_break(c) && c != '\u{FEFF}'
}

/// Check whether the character is a non-space content character.
#[inline]
#[must_use]
pub fn is_ns_char(c: char) -> bool {
    is_nb_char(c) && !is_white(c)
}

/// Check whether the character has special meaning at the start of a node.
#[inline]
#[must_use]
pub fn is_indicator(c: char) -> bool {
    matches!(
        c,
        '-' | '?'
            | ':'
            | ','
            | '['
            | ']'
            | '{'
            | '}'
            | '#'
            | '&'
            | '*'
            | '!'
            | '|'
            | '>'
            | '\''
            | '"'
            | '%'
            | '@'
            | '`'
    )
}

/// Check whether the character delimits flow collection entries (one of `,[]{}`).
#[inline]
#[must_use]
pub fn is_flow_indicator(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// Check whether the character is an ASCII decimal digit.
#[inline]
#[must_use]
pub fn is_dec_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Check whether the character is a hexadecimal digit (case insensitive).
#[inline]
#[must_use]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Convert a hexadecimal digit to its integer value.
#[inline]
#[must_use]
pub fn as_hex(c: char) -> u32 {
    match c {
        '0'..='9' => c as u32 - '0' as u32,
        'a'..='f' => c as u32 - 'a' as u32 + 10,
        'A'..='F' => c as u32 - 'A' as u32 + 10,
        _ => unreachable!(),
    }
}

/// Check whether the character is a word character (alphanumeric or `-`).
#[inline]
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Check whether the character may appear in a URI.
///
/// Besides word characters this admits `%` hex-escapes (the escape digits
/// are validated by the caller) and the URI punctuation set.
#[inline]
#[must_use]
pub fn is_uri_char(c: char) -> bool {
    is_word_char(c)
        || matches!(
            c,
            '%' | '#'
                | ';'
                | '/'
                | '?'
                | ':'
                | '@'
                | '&'
                | '='
                | '+'
                | '$'
                | ','
                | '_'
                | '.'
                | '!'
                | '~'
                | '*'
                | '\''
                | '('
                | ')'
                | '['
                | ']'
        )
}

/// Check whether the character may appear in a tag shorthand suffix.
///
/// Tag characters are URI characters minus `!` and the flow indicators,
/// which would be ambiguous inside node properties and flow collections.
#[inline]
#[must_use]
pub fn is_tag_char(c: char) -> bool {
    is_uri_char(c) && c != '!' && !is_flow_indicator(c)
}

/// Check whether the character may appear in an anchor or alias name.
#[inline]
#[must_use]
pub fn is_anchor_char(c: char) -> bool {
    is_ns_char(c) && !is_flow_indicator(c)
}
