// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Property tests for the parser's normalization invariants.

#[macro_use]
extern crate quickcheck;

use quickcheck::TestResult;

use yaml_syntax::{parse, Node, Value};

/// Reduce arbitrary strings to plain alphanumeric words so the property
/// inputs stay inside the grammar being tested.
fn sanitize(s: &str) -> String {
    let word: String = s.chars().filter(char::is_ascii_alphanumeric).collect();
    if word.is_empty() {
        "x".to_owned()
    } else {
        word
    }
}

/// A span-free rendering of a node's structure and content, for comparing
/// trees parsed from different positions in the input.
fn shape(node: &Node) -> String {
    match &node.value {
        Value::Scalar { value, .. } => format!("={value:?}"),
        Value::Alias(name) => format!("*{name}"),
        Value::Empty => "~".to_owned(),
        Value::Sequence { items, .. } => {
            let inner: Vec<String> = items.iter().map(shape).collect();
            format!("[{}]", inner.join(","))
        }
        Value::Mapping { entries, .. } => {
            let inner: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}:{}", shape(k), shape(v)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
    }
}

fn walk_scalars(node: &Node, check: &mut impl FnMut(&str)) {
    match &node.value {
        Value::Scalar { value, .. } => check(value),
        Value::Sequence { items, .. } => {
            for item in items {
                walk_scalars(item, check);
            }
        }
        Value::Mapping { entries, .. } => {
            for (key, value) in entries {
                walk_scalars(key, check);
                walk_scalars(value, check);
            }
        }
        Value::Alias(_) | Value::Empty => {}
    }
}

quickcheck! {
    /// A literal block scalar reproduces its lines joined by `\n`.
    fn prop_literal_block_round_trip(lines: Vec<String>) -> TestResult {
        let lines: Vec<String> = lines.iter().map(|l| sanitize(l)).collect();
        if lines.is_empty() {
            return TestResult::discard();
        }
        let mut input = String::from("|\n");
        for line in &lines {
            input.push_str("  ");
            input.push_str(line);
            input.push('\n');
        }
        let expected = lines.join("\n") + "\n";
        match parse(&input) {
            Ok(stream) => {
                let Value::Scalar { value, .. } = &stream.documents[0].root.value else {
                    return TestResult::failed();
                };
                TestResult::from_bool(*value == expected)
            }
            Err(err) => TestResult::error(err.to_string()),
        }
    }

    /// CRLF and LF inputs produce identical token trees (breaks are
    /// normalized to a single line feed everywhere).
    fn prop_crlf_and_lf_parse_identically(pairs: Vec<(String, String)>) -> TestResult {
        if pairs.is_empty() {
            return TestResult::discard();
        }
        let mut input = String::new();
        for (index, (key, value)) in pairs.iter().enumerate() {
            input.push_str(&format!("{}{}: {}\n", sanitize(key), index, sanitize(value)));
        }
        let with_crlf = input.replace('\n', "\r\n");
        match (parse(&input), parse(&with_crlf)) {
            (Ok(lf), Ok(crlf)) => TestResult::from_bool(
                shape(&lf.documents[0].root) == shape(&crlf.documents[0].root),
            ),
            (Err(err), _) | (_, Err(err)) => TestResult::error(err.to_string()),
        }
    }

    /// No scalar in a parsed tree ever contains a carriage return.
    fn prop_no_carriage_returns_in_scalars(lines: Vec<String>) -> TestResult {
        let lines: Vec<String> = lines.iter().map(|l| sanitize(l)).collect();
        if lines.is_empty() {
            return TestResult::discard();
        }
        let mut input = String::from("k: |\r\n");
        for line in &lines {
            input.push_str("  ");
            input.push_str(line);
            input.push_str("\r\n");
        }
        match parse(&input) {
            Ok(stream) => {
                let mut clean = true;
                walk_scalars(&stream.documents[0].root, &mut |value| {
                    if value.contains('\r') {
                        clean = false;
                    }
                });
                TestResult::from_bool(clean)
            }
            Err(err) => TestResult::error(err.to_string()),
        }
    }

    /// Concatenating two streams with an intervening `...` yields the
    /// concatenation of their documents.
    fn prop_stream_concatenation(first: Vec<String>, second: Vec<String>) -> TestResult {
        if first.is_empty() || second.is_empty() {
            return TestResult::discard();
        }
        let build = |words: &[String]| {
            let mut out = String::new();
            for (index, word) in words.iter().enumerate() {
                out.push_str(&format!("k{index}: {}\n", sanitize(word)));
            }
            out
        };
        let s1 = build(&first);
        let s2 = build(&second);
        let combined = format!("{s1}...\n{s2}");
        match (parse(&s1), parse(&s2), parse(&combined)) {
            (Ok(a), Ok(b), Ok(c)) => {
                let expected: Vec<String> =
                    a.iter().chain(b.iter()).map(|d| shape(&d.root)).collect();
                let actual: Vec<String> = c.iter().map(|d| shape(&d.root)).collect();
                TestResult::from_bool(expected == actual)
            }
            (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                TestResult::error(err.to_string())
            }
        }
    }
}
