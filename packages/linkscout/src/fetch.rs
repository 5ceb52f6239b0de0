//! HTTP page fetcher.
//!
//! Fetches a URL and reduces the HTML to title, body text and headings.
//! The reduction is regex-based and deliberately coarse: scripts, styles
//! and chrome (nav, header, footer, aside, forms) are stripped, then text
//! is collected from content elements only.

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::traits::PageFetcher;
use crate::types::PageContent;
use crate::urls::{clean_text, extract_domain};

/// Elements removed wholesale before text extraction.
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form", "noscript", "iframe",
];

/// Elements whose text is collected into the page body.
const CONTENT_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th", "article", "section", "main",
    "blockquote",
];

/// Text fragments at or below this length are noise (menu items, labels).
const MIN_FRAGMENT_LEN: usize = 10;

/// Headings at or below this length are skipped.
const MIN_HEADING_LEN: usize = 3;

/// HTTP-backed [`PageFetcher`].
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
    timeout: std::time::Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with a 30 second timeout and a browser-like agent.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            timeout: std::time::Duration::from_secs(30),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header("User-Agent", &self.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "page request failed");
                if e.is_timeout() {
                    ScrapeError::Timeout {
                        url: url.to_string(),
                        seconds: self.timeout.as_secs(),
                    }
                } else if e.is_builder() {
                    ScrapeError::InvalidUrl {
                        url: url.to_string(),
                    }
                } else {
                    ScrapeError::Transport {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| ScrapeError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, ScrapeError> {
        let html = self.fetch_html(url).await?;

        let title = extract_title(&html);
        let text = extract_text(&html);
        let headings = extract_headings(&html);

        if text.is_empty() {
            return Err(ScrapeError::EmptyContent {
                url: url.to_string(),
            });
        }

        debug!(
            url = %url,
            text_len = text.len(),
            headings = headings.len(),
            "page content extracted"
        );

        Ok(PageContent::new(url, extract_domain(url))
            .with_title(title)
            .with_text(text)
            .with_headings(headings))
    }
}

/// Extract the page title: `<title>` first, then the first `<h1>`.
fn extract_title(html: &str) -> String {
    let title_pattern = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    if let Some(cap) = title_pattern.captures(html) {
        let title = clean_text(&strip_tags(&cap[1]));
        if !title.is_empty() {
            return title;
        }
    }

    let h1_pattern = Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap();
    if let Some(cap) = h1_pattern.captures(html) {
        return clean_text(&strip_tags(&cap[1]));
    }

    String::new()
}

/// Extract meaningful body text from content elements, in document order.
fn extract_text(html: &str) -> String {
    let html = strip_blocks(html);

    let mut parts: Vec<(usize, String)> = Vec::new();
    for tag in CONTENT_TAGS {
        let pattern = Regex::new(&format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")).unwrap();
        for cap in pattern.captures_iter(&html) {
            let text = clean_text(&strip_tags(&cap[1]));
            if text.len() > MIN_FRAGMENT_LEN {
                let start = cap.get(0).map(|m| m.start()).unwrap_or(0);
                parts.push((start, text));
            }
        }
    }

    parts.sort_by_key(|(start, _)| *start);
    let texts: Vec<String> = parts.into_iter().map(|(_, text)| text).collect();
    clean_text(&texts.join(" "))
}

/// Extract all heading texts in document order.
fn extract_headings(html: &str) -> Vec<String> {
    let html = strip_blocks(html);
    let pattern = Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>").unwrap();

    pattern
        .captures_iter(&html)
        .map(|cap| clean_text(&strip_tags(&cap[1])))
        .filter(|text| text.len() > MIN_HEADING_LEN)
        .collect()
}

/// Remove non-content blocks wholesale.
fn strip_blocks(html: &str) -> String {
    let mut text = html.to_string();
    for tag in STRIPPED_TAGS {
        let pattern = Regex::new(&format!(r"(?is)<{tag}(?:\s[^>]*)?>.*?</{tag}>")).unwrap();
        text = pattern.replace_all(&text, " ").into_owned();
    }
    text
}

/// Drop remaining tags and decode the common entities.
fn strip_tags(fragment: &str) -> String {
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
    let text = tag_pattern.replace_all(fragment, " ");

    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
