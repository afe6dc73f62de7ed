//! Filesystem-safe slug generator.
//!
//! # Invariants
//! - Output contains only `[a-z0-9-]`, never starts or ends with `-`, and never
//!   holds two consecutive hyphens.
//! - Output length is at most `max_len` characters.
//! - `slugify(slugify(x, n), n) == slugify(x, n)`.

use crate::config::SlugConfig;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Derives a lowercase hyphenated identifier bounded to `max_len` characters.
///
/// Uniqueness is not guaranteed; callers resolve collisions.
pub fn slugify(title: &str, max_len: usize) -> String {
    let lowered = title.trim().to_lowercase();
    let hyphenated = NON_SLUG_RUN_RE.replace_all(&lowered, "-");
    let stripped = hyphenated.trim_matches('-');
    // Only ASCII remains, so byte and char lengths agree.
    let truncated = &stripped[..stripped.len().min(max_len)];
    truncated.trim_end_matches('-').to_string()
}

/// Slugifies with the configured maximum length.
pub fn slugify_with(title: &str, config: &SlugConfig) -> String {
    slugify(title, config.max_len)
}
