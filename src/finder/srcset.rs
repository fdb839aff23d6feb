// src/finder/srcset.rs
// =============================================================================
// Splits a srcset attribute into bare URLs.
//
// A srcset looks like:  "small.png 480w, large.png 1080w"
// Each comma separated entry is a URL optionally followed by a descriptor.
// We trim each entry and then drop the last space and everything after it,
// which is exactly what the regex " [^ ]*$" matches.
//
// Entries without a space are left alone. Entries with several spaces only
// lose their final token ("a b c" becomes "a b").
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static DESCRIPTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(" [^ ]*$").expect("descriptor pattern is valid"));

/// Returns the URL part of every entry in a srcset value
pub fn split_srcset(value: &str) -> Vec<Cow<'_, str>> {
    value
        .split(',')
        .map(|entry| DESCRIPTOR.replace_all(entry.trim(), ""))
        .collect()
}
