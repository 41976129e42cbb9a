// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! URL slugs
//!
//! A slug is the cache key and the identity column of a dataset row, so it must
//! be a pure function of the URL and safe to use as a file name.

use deunicode::deunicode;
use regex::Regex;
use std::sync::OnceLock;

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"))
}

/// Turn a URL into a lowercase, filesystem-safe identifier
///
/// Non-ASCII text is transliterated first (`東京` → `dong-jing`, `é` → `e`).
/// Every run of characters outside `[a-z0-9]` then collapses into one `-`, and
/// leading/trailing separators are trimmed. The result never contains `/` or `.`.
pub fn slugify(url: &str) -> String {
    let lowered = deunicode(url).to_lowercase();
    separators()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
