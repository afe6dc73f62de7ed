//! Pattern-priority content classifier.
//!
//! # Responsibility
//! - Label chunk text with a `ContentKind` using ordered regex rules.
//!
//! # Invariants
//! - Rules are evaluated in `ContentKind` priority order; first match wins.
//! - Matching is case-sensitive and depends only on the input text.

use crate::model::content_kind::ContentKind;
use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(```|\$ )").expect("valid reference regex"));
static ENDPOINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(GET|POST|PUT|DELETE|PATCH)\b\s+/").expect("valid endpoint regex")
});
static FUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+\s*\(.*\)\s*\{").expect("valid function regex"));
static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^Syntax:|^(\w+\s+)?--\w|^\$ ").expect("valid command regex")
});

/// Returns the first matching kind, falling back to `ContentKind::Concept`.
pub fn classify(text: &str) -> ContentKind {
    let rules: [(&Lazy<Regex>, ContentKind); 4] = [
        (&REFERENCE_RE, ContentKind::Reference),
        (&ENDPOINT_RE, ContentKind::Endpoint),
        (&FUNCTION_RE, ContentKind::Function),
        (&COMMAND_RE, ContentKind::Command),
    ];
    rules
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, kind)| *kind)
        .unwrap_or(ContentKind::Concept)
}
