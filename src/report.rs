// src/report.rs
// =============================================================================
// Turns the links found on each page into something a person (or a script)
// can read: a table per page, or one JSON document for everything.
//
// The link set coming out of the finder is a HashMap, so its order is
// arbitrary. We sort links by URL here to keep the output stable.
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use crate::finder::{LinkError, LinkSet};

/// One discovered link, ready for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    pub url: String,
    /// Why the link is not a valid URL reference, if it isn't
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LinkRecord {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<(String, Option<LinkError>)> for LinkRecord {
    fn from((url, error): (String, Option<LinkError>)) -> Self {
        Self {
            url,
            error: error.map(|e| e.to_string()),
        }
    }
}

/// Everything found on one page
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub page: String,
    /// Set when the page itself could not be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub links: Vec<LinkRecord>,
}

impl PageReport {
    pub fn from_links(page: impl Into<String>, links: LinkSet) -> Self {
        let mut links: Vec<LinkRecord> = links.into_iter().map(LinkRecord::from).collect();
        links.sort_by(|a, b| a.url.cmp(&b.url));

        Self {
            page: page.into(),
            error: None,
            links,
        }
    }

    pub fn failed(page: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            page: page.into(),
            error: Some(error.to_string()),
            links: Vec::new(),
        }
    }

    pub fn malformed_count(&self) -> usize {
        self.links.iter().filter(|l| !l.is_ok()).count()
    }

    /// True when the page failed to load or holds a malformed link
    pub fn has_problems(&self) -> bool {
        self.error.is_some() || self.malformed_count() > 0
    }
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📄 {}", self.page)?;

        if let Some(error) = &self.error {
            writeln!(f, "   ⚠️  Could not load page: {}", error)?;
            return Ok(());
        }

        writeln!(f, "{:<70} {:<12} {:<30}", "URL", "STATUS", "MESSAGE")?;
        writeln!(f, "{}", "=".repeat(112))?;

        for link in &self.links {
            let (status, message) = match &link.error {
                None => ("✅ OK", ""),
                Some(error) => ("❌ MALFORMED", error.as_str()),
            };

            // Truncate URL if too long for display
            let url_display = match link.url.char_indices().nth(67) {
                Some((cut, _)) => format!("{}...", &link.url[..cut]),
                None => link.url.clone(),
            };

            writeln!(f, "{:<70} {:<12} {:<30}", url_display, status, message)?;
        }

        Ok(())
    }
}

/// Prints the reports as tables with a summary, or as pretty JSON
pub fn print_reports(reports: &[PageReport], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
    } else {
        for report in reports {
            println!("{}", report);
        }
        print_summary(reports);
    }
    Ok(())
}

fn print_summary(reports: &[PageReport]) {
    let total: usize = reports.iter().map(|r| r.links.len()).sum();
    let malformed: usize = reports.iter().map(|r| r.malformed_count()).sum();
    let failed = reports.iter().filter(|r| r.error.is_some()).count();

    println!("📊 Summary:");
    println!("   📄 Pages: {}", reports.len());
    if failed > 0 {
        println!("   ⚠️  Failed pages: {}", failed);
    }
    println!("   ✅ OK: {}", total - malformed);
    println!("   ❌ Malformed: {}", malformed);
    println!("   📋 Total: {}", total);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PageReport {
        let links = LinkSet::from([
            ("https://x.test/b".to_string(), None),
            ("https://x.test/a".to_string(), None),
            (
                "http://[::1".to_string(),
                Some(LinkError::InvalidReference(url::ParseError::InvalidIpv6Address)),
            ),
        ]);
        PageReport::from_links("https://x.test/", links)
    }

    #[test]
    fn test_links_are_sorted() {
        let urls: Vec<_> = sample().links.into_iter().map(|l| l.url).collect();
        assert_eq!(urls, vec!["http://[::1", "https://x.test/a", "https://x.test/b"]);
    }

    #[test]
    fn test_problem_detection() {
        let report = sample();
        assert_eq!(report.malformed_count(), 1);
        assert!(report.has_problems());

        let clean = PageReport::from_links("https://x.test/", LinkSet::new());
        assert!(!clean.has_problems());

        let failed = PageReport::failed("https://x.test/", "HTTP 404 Not Found");
        assert!(failed.has_problems());
    }

    #[test]
    fn test_json_output() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["page"], "https://x.test/");
        assert!(value.get("error").is_none());
        assert_eq!(value["links"][0]["url"], "http://[::1");
        assert_eq!(value["links"][0]["error"], "invalid URL reference: invalid IPv6 address");
        assert!(value["links"][1].get("error").is_none());
    }

    #[test]
    fn test_table_output() {
        let table = sample().to_string();
        assert!(table.starts_with("📄 https://x.test/\n"));
        assert!(table.contains("❌ MALFORMED"));
        assert!(table.contains("https://x.test/a"));

        let failed = PageReport::failed("https://x.test/", "HTTP 500").to_string();
        assert!(failed.contains("Could not load page: HTTP 500"));
    }

    #[test]
    fn test_long_urls_are_truncated() {
        let long = format!("https://x.test/{}", "a".repeat(100));
        let report = PageReport::from_links("p", LinkSet::from([(long.clone(), None)]));
        let table = report.to_string();
        assert!(!table.contains(&long));
        assert!(table.contains("..."));
    }
}
