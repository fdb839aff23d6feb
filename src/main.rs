// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the HTML (from a file, stdin, or by downloading pages)
// 3. Run the link finder over every document
// 4. Print results and exit with a proper code
//    (0 = all links valid, 1 = malformed links or failed pages, 2 = error)
// =============================================================================

mod cli;       // src/cli.rs - command-line parsing
mod finder;    // src/finder/ - link discovery
mod http;      // src/http/ - HTTP client factory and page fetching
mod logging;   // src/logging.rs - env_logger setup
mod report;    // src/report.rs - table and JSON output

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use scraper::Html;
use std::io::Read;
use std::path::Path;
use url::Url;

use cli::{Cli, Commands, FilterArgs, HttpArgs};
use finder::LinkFinder;
use http::{fetch_pages, HttpClientFactory, ReqwestClientFactory};
use report::PageReport;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    let (reports, json) = match cli.command {
        Commands::File {
            path,
            base,
            filters,
            json,
        } => (vec![handle_file_scan(&path, &base, &filters)?], json),
        Commands::Url {
            urls,
            filters,
            http,
            json,
        } => (handle_url_scan(urls, &filters, &http).await?, json),
    };

    report::print_reports(&reports, json)?;

    if reports.iter().any(PageReport::has_problems) {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'file' subcommand
fn handle_file_scan(path: &Path, base: &str, filters: &FilterArgs) -> Result<PageReport> {
    let base = Url::parse(base).with_context(|| format!("Invalid base URL '{}'", base))?;
    let finder = build_finder(filters)?;

    let html = if path == Path::new("-") {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from stdin")?;
        html
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let document = Html::parse_document(&html);
    let links = finder.find_in_document(&document, &base);
    info!("{} link(s) found in {}", links.len(), path.display());

    Ok(PageReport::from_links(path.display().to_string(), links))
}

// Handles the 'url' subcommand
//
// Pages are fetched concurrently; each one is then searched on its own,
// with relative links resolved against the URL the page was served from.
async fn handle_url_scan(
    urls: Vec<String>,
    filters: &FilterArgs,
    http: &HttpArgs,
) -> Result<Vec<PageReport>> {
    let finder = build_finder(filters)?;
    let client = ReqwestClientFactory
        .create(&http.to_options())
        .context("Failed to create HTTP client")?;

    let mut reports: Vec<PageReport> = fetch_pages(&client, urls)
        .await
        .into_iter()
        .map(|(url, result)| match result {
            Ok(page) => {
                let document = Html::parse_document(&page.body);
                let links = finder.find_in_document(&document, &page.url);
                info!("{} link(s) found on {}", links.len(), page.url);
                PageReport::from_links(url, links)
            }
            Err(e) => PageReport::failed(url, e),
        })
        .collect();

    // fetch_pages returns pages as they complete
    reports.sort_by(|a, b| a.page.cmp(&b.page));

    Ok(reports)
}

fn build_finder(filters: &FilterArgs) -> Result<LinkFinder> {
    let (excluded, included) = filters.compile()?;
    Ok(LinkFinder::new(excluded, included))
}
