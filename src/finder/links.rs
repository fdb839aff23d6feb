// src/finder/links.rs
// =============================================================================
// LinkFinder: discovers links in a parsed HTML tree.
//
// How it works:
// 1. Walk every element below (and including) the root
// 2. Keep the elements listed in tags::TAG_ATTRIBUTES
// 3. Read each of their link attributes (srcset gets split into entries)
// 4. Drop empty, excluded, and not-included candidates
// 5. Parse what is left as a URL reference:
//    - parse failure: keep the raw string, paired with the error
//    - foreign scheme (mailto:, javascript:, ...): drop silently
//    - otherwise: resolve against the base URL and keep the result
//
// The url crate has no "relative reference" type. Url::parse fails with
// RelativeUrlWithoutBase for anything without a scheme, so that particular
// error means "empty scheme" and we resolve with base.join() instead.
//
// Absolute links come out in the url crate's normalized form, not exactly
// as written: "http://other.test" gains a trailing slash, and the opaque
// "http:foo" becomes "http://foo/". Relative links get the same treatment
// once joined, so every key in the result is in one consistent shape.
// =============================================================================

use log::{debug, trace};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::borrow::Cow;
use std::collections::HashMap;
use url::{ParseError, Url};

use super::error::LinkError;
use super::reference::check_reference;
use super::srcset::split_srcset;
use super::tags::{attributes_for, is_valid_scheme, SRCSET};

/// Discovered links, mapped to an error when the string is not a valid URL
pub type LinkSet = HashMap<String, Option<LinkError>>;

#[derive(Debug, Clone, Default)]
pub struct LinkFinder {
    excluded_patterns: Vec<Regex>,
    included_patterns: Vec<Regex>,
}

impl LinkFinder {
    // Creates a finder from already compiled patterns
    //
    // Parameters:
    //   excluded_patterns: a link matching any of these is dropped
    //   included_patterns: when not empty, a link must match one of these
    pub fn new(excluded_patterns: Vec<Regex>, included_patterns: Vec<Regex>) -> Self {
        Self {
            excluded_patterns,
            included_patterns,
        }
    }

    // Finds all links in the tree rooted at `root`
    //
    // Parameters:
    //   root: the element to start from (it is searched too)
    //   base: the URL relative links are resolved against
    //
    // Returns: LinkSet mapping each link to None, or to the error that
    //          made it an invalid URL reference
    //
    // Example:
    //   root = <a href="/docs">Docs</a>
    //   base = "https://example.com/page"
    //   result = {"https://example.com/docs": None}
    pub fn find(&self, root: ElementRef<'_>, base: &Url) -> LinkSet {
        let mut links = LinkSet::new();

        // descendants() yields every node, text and comments included;
        // ElementRef::wrap keeps only the elements
        for element in root.descendants().filter_map(ElementRef::wrap) {
            // Skip elements that never carry links (div, p, span, ...)
            let Some(attributes) = attributes_for(element.value().name()) else {
                continue;
            };

            for &attribute in attributes {
                // A missing attribute behaves like an empty one
                let value = element.value().attr(attribute).unwrap_or("");

                for candidate in parse_links(value, attribute) {
                    let candidate = candidate.trim();

                    // Exclusion always applies, whatever the include list says
                    if candidate.is_empty() || self.is_link_excluded(candidate) {
                        continue;
                    }

                    // only use include patterns when there are some
                    if !self.included_patterns.is_empty() && !self.is_link_included(candidate) {
                        trace!("Skipping {candidate}: matches no include pattern");
                        continue;
                    }

                    match resolve(candidate, base) {
                        // Valid link, stored in its absolute form
                        Ok(Some(url)) => {
                            links.insert(url.to_string(), None);
                        }
                        // mailto:, javascript:, ... are not links we follow
                        Ok(None) => trace!("Skipping {candidate}: unsupported scheme"),
                        // Malformed: keep the raw string so callers can report it
                        Err(err) => {
                            debug!("Malformed link {candidate:?}: {err}");
                            links.insert(candidate.to_string(), Some(err));
                        }
                    }
                }
            }
        }

        links
    }

    /// Runs `find` over a whole parsed document
    pub fn find_in_document(&self, document: &Html, base: &Url) -> LinkSet {
        self.find(document.root_element(), base)
    }

    fn is_link_excluded(&self, link: &str) -> bool {
        is_match(link, &self.excluded_patterns)
    }

    fn is_link_included(&self, link: &str) -> bool {
        is_match(link, &self.included_patterns)
    }
}

// srcset holds several entries, every other attribute holds one link
fn parse_links<'a>(value: &'a str, attribute: &str) -> Vec<Cow<'a, str>> {
    if attribute == SRCSET {
        split_srcset(value)
    } else {
        vec![Cow::Borrowed(value)]
    }
}

fn is_match(link: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(link))
}

// Parses a reference and resolves it against the base URL
//
// Parameters:
//   reference: a trimmed, non-empty candidate
//   base: the page URL
//
// Returns:
//   Ok(Some(url)) for http, https and relative references
//   Ok(None) when the reference parsed fine but uses a scheme we don't follow
//   Err(..) when it is not a valid URL reference
//
// Examples:
//   "/docs"                -> Ok(Some("https://example.com/docs"))
//   "mailto:me@x.test"     -> Ok(None)
//   "/a%zz"                -> Err(InvalidEscape)
fn resolve(reference: &str, base: &Url) -> Result<Option<Url>, LinkError> {
    // The url crate would quietly repair some broken references, catch those first
    check_reference(reference)?;

    match Url::parse(reference) {
        // Absolute reference with a scheme we keep
        Ok(url) if is_valid_scheme(url.scheme()) => Ok(Some(url)),
        // Absolute reference with any other scheme
        Ok(_) => Ok(None),
        // No scheme at all: relative, so join it with the base
        Err(ParseError::RelativeUrlWithoutBase) => Ok(Some(base.join(reference)?)),
        // Anything else is malformed (bad host, bad port, ...)
        Err(err) => Err(err.into()),
    }
}
