// ABOUTME: RSS feed parsing into plain entries the scrapers can filter.
// ABOUTME: Keeps only the fields used for keyword matching and download.

use crate::error::FetchError;

/// One item from a syndication feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub link: Option<String>,
}

impl FeedEntry {
    /// Lower-cased `title + " " + summary`, the text keyword checks run on.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }
}

/// Parse an RSS 2.0 document.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FetchError> {
    let channel =
        rss::Channel::read_from(xml.as_bytes()).map_err(|e| FetchError::Feed(e.to_string()))?;

    Ok(channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().unwrap_or_default().to_string(),
            summary: item.description().unwrap_or_default().to_string(),
            link: item.link().map(|l| l.trim().to_string()),
        })
        .collect())
}
