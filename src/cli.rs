// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - file: find links in a local HTML file (or stdin), against a given base
// - url:  download one or more pages and find links in each of them
//
// Filters (--exclude / --include) are shared by both subcommands, so they
// live in their own struct and get flattened in.
// =============================================================================

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::HttpClientOptions;

#[derive(Parser, Debug)]
#[command(
    name = "link-finder",
    version = "0.1.0",
    about = "Find and normalize the links in HTML pages",
    long_about = "link-finder lists every link an HTML page references (anchors, images, scripts, \
                  stylesheets, frames, media sources), resolved against the page URL. \
                  Malformed references are reported instead of silently dropped."
)]
pub struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Silence all logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find links in a local HTML file
    ///
    /// Example: link-finder file index.html --base https://example.com/
    File {
        /// Path to the HTML file, or '-' to read from stdin
        path: PathBuf,

        /// URL that relative links are resolved against
        #[arg(long)]
        base: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Download pages and find the links in each of them
    ///
    /// Example: link-finder url https://example.com --exclude '\.pdf$'
    Url {
        /// Page URL(s) to scan
        #[arg(required = true)]
        urls: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        http: HttpArgs,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Skip links matching this regex (can be repeated)
    #[arg(long = "exclude", value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Only keep links matching at least one of these regexes (can be repeated)
    #[arg(long = "include", value_name = "REGEX")]
    pub include: Vec<String>,
}

impl FilterArgs {
    /// Compiles the exclude and include patterns, in that order
    pub fn compile(&self) -> Result<(Vec<Regex>, Vec<Regex>)> {
        Ok((compile_patterns(&self.exclude)?, compile_patterns(&self.include)?))
    }
}

#[derive(Args, Debug)]
pub struct HttpArgs {
    /// Maximum number of connections per host
    #[arg(long, default_value_t = 64)]
    pub max_connections_per_host: usize,

    /// Maximum page size in bytes
    #[arg(long, default_value_t = 4 * 1024 * 1024)]
    pub buffer_size: usize,

    /// Proxy address (e.g. http://127.0.0.1:3128)
    #[arg(long, default_value = "")]
    pub proxy: String,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub skip_tls_verification: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Extra request header, as "Name: value" (can be repeated)
    #[arg(long = "header", value_name = "HEADER", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

impl HttpArgs {
    pub fn to_options(&self) -> HttpClientOptions {
        HttpClientOptions {
            max_connections_per_host: self.max_connections_per_host,
            buffer_size: self.buffer_size,
            proxy: self.proxy.clone(),
            skip_tls_verification: self.skip_tls_verification,
            timeout: Duration::from_secs(self.timeout),
            headers: self.headers.iter().cloned().collect::<HashMap<_, _>>(),
        }
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("Invalid pattern '{}'", p)))
        .collect()
}

// Splits "Name: value" into its two halves
fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{}'", s));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("User-Agent: link-finder/0.1"),
            Ok(("User-Agent".to_string(), "link-finder/0.1".to_string()))
        );
        // only the first colon separates
        assert_eq!(
            parse_header("Referer: https://example.com"),
            Ok(("Referer".to_string(), "https://example.com".to_string()))
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_compile_filters() {
        let filters = FilterArgs {
            exclude: vec!["\\.pdf$".to_string()],
            include: vec![],
        };
        let (exclude, include) = filters.compile().unwrap();
        assert_eq!(exclude.len(), 1);
        assert!(include.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let filters = FilterArgs {
            exclude: vec![],
            include: vec!["(unclosed".to_string()],
        };
        let err = filters.compile().unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_url_command_options() {
        let cli = Cli::parse_from([
            "link-finder",
            "url",
            "https://example.com",
            "--exclude",
            "ads",
            "--header",
            "X-Token: abc",
            "--timeout",
            "3",
            "--skip-tls-verification",
        ]);

        let Commands::Url { urls, filters, http, json } = cli.command else {
            panic!("expected url command");
        };
        assert_eq!(urls, vec!["https://example.com"]);
        assert_eq!(filters.exclude, vec!["ads"]);
        assert!(!json);

        let options = http.to_options();
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert!(options.skip_tls_verification);
        assert!(options.proxy.is_empty());
        assert_eq!(options.max_connections_per_host, 64);
        assert_eq!(options.headers.get("X-Token").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_file_command_requires_base() {
        assert!(Cli::try_parse_from(["link-finder", "file", "index.html"]).is_err());

        let cli = Cli::try_parse_from(["link-finder", "-v", "file", "-", "--base", "https://x.test/"])
            .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::File { ref path, .. } if path.to_str() == Some("-")));
    }
}
