// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generic verb/subject inference for endpoints without a fixed label.

use std::sync::LazyLock;

use regex::Regex;

/// Segment prefixes and the verb each implies, in match order.
pub const PREFIX_VERBS: &[(&str, &str)] = &[
    ("GET", "Fetched"),
    ("POST", "Created"),
    ("PUT", "Updated"),
    ("PATCH", "Updated"),
    ("DELETE", "Deleted"),
    ("CHECK", "Checked"),
];

/// Verb used when neither the segment nor the method names one.
pub const FALLBACK_VERB: &str = "Processed";

/// Subject used when nothing is left after stripping the prefix.
pub const UNKNOWN_SUBJECT: &str = "Unknown Object";

// Lowercase letter followed by an uppercase letter or a digit.
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z0-9])").expect("word boundary pattern is valid"));

/// Split a leading verb prefix (`GET`, `POST`, ...) off a segment, ignoring
/// case. Returns the verb and the remaining subject.
pub fn split_verb_prefix(segment: &str) -> Option<(&'static str, &str)> {
    PREFIX_VERBS.iter().find_map(|&(prefix, verb)| {
        let head = segment.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| (verb, &segment[prefix.len()..]))
    })
}

/// Verb implied by the HTTP method, or [`FALLBACK_VERB`].
pub fn verb_for_method(method: &str) -> &'static str {
    match method.to_uppercase().as_str() {
        "GET" => "Fetched",
        "POST" => "Created",
        "PUT" | "PATCH" => "Updated",
        "DELETE" => "Deleted",
        _ => FALLBACK_VERB,
    }
}

/// Turn an identifier-ish subject into title-cased words.
///
/// `create_userAccount` becomes `Create User Account`.
pub fn format_subject(subject: &str) -> String {
    let spaced = subject.replace('_', " ");
    let spaced = WORD_BOUNDARY.replace_all(&spaced, "${1} ${2}");
    spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
