// src/finder/tags.rs
// =============================================================================
// Static lookup tables used during link discovery.
//
// TAG_ATTRIBUTES maps an element name to the attribute(s) that may hold a
// link. Most elements have one; <source> has two, and one of those (srcset)
// holds a comma separated list instead of a single URL.
//
// VALID_SCHEMES lists the schemes we keep. The empty scheme stands for
// relative and scheme-relative references like "/docs" or "//cdn.test/x.js".
// =============================================================================

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Attribute whose value is a list of "URL descriptor" entries
pub const SRCSET: &str = "srcset";

pub static TAG_ATTRIBUTES: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        HashMap::from([
            ("a", &["href"][..]),
            ("frame", &["src"][..]),
            ("iframe", &["src"][..]),
            ("img", &["src"][..]),
            ("link", &["href"][..]),
            ("script", &["src"][..]),
            ("source", &["src", SRCSET][..]),
            ("track", &["src"][..]),
        ])
    });

pub const VALID_SCHEMES: [&str; 3] = ["", "http", "https"];

/// Returns the link-carrying attributes of an element, if it has any
pub fn attributes_for(tag: &str) -> Option<&'static [&'static str]> {
    TAG_ATTRIBUTES.get(tag).copied()
}

pub fn is_valid_scheme(scheme: &str) -> bool {
    VALID_SCHEMES.contains(&scheme)
}
