// src/finder/mod.rs
// =============================================================================
// This module contains the link discovery engine.
//
// Submodules:
// - tags: Which HTML elements carry links, and in which attributes
// - srcset: Splits responsive image source lists into single URLs
// - error: The errors a discovered link can carry
// - reference: Strict syntax checks run before URL parsing
// - links: LinkFinder itself (walks the tree, filters, resolves)
//
// The engine never fetches anything. It takes an already parsed document
// and a base URL and hands back the set of links it found.
// =============================================================================

mod error;
mod links;
mod reference;
mod srcset;
mod tags;

pub use error::LinkError;
pub use links::{LinkFinder, LinkSet};
