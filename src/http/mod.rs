// src/http/mod.rs
// =============================================================================
// This module downloads the pages we look for links in.
//
// Submodules:
// - client: HttpClientOptions, the HttpClientFactory trait and its reqwest
//   implementation
// - fetch: Downloads one or many pages with a built client
// - error: What can go wrong along the way
//
// The link finder itself never touches this module. Only main.rs uses it,
// for the `url` subcommand.
// =============================================================================

mod client;
mod error;
mod fetch;

pub use client::{HttpClientFactory, HttpClientOptions, ReqwestClientFactory};
pub use fetch::fetch_pages;
