// ABOUTME: News module - fetches articles per source and writes text blobs.
// ABOUTME: Sources, keyword matching, and run reports shared by the scrapers.

mod aljazeera;
mod extract;
mod feed;
mod fetcher;
mod guardian;
mod nyt;
mod scrape;

#[cfg(test)]
mod fetcher_test;

pub use extract::{extract_article, extract_with_selectors};
pub use feed::{FeedEntry, parse_feed};
pub use fetcher::{FetchOutcome, NewsFetcher};
pub use guardian::{GuardianEnvelope, GuardianFields, GuardianItem, GuardianResponse};
pub use nyt::{TopStoriesResponse, TopStory};
pub use scrape::ArticleScraper;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

/// A news source the fetcher knows how to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Nyt,
    Guardian,
    Aljazeera,
    /// Every single source, concatenated.
    All,
}

impl Source {
    /// The individually scraped sources, in the order combined mode runs them.
    pub const SINGLE: [Source; 3] = [Source::Nyt, Source::Guardian, Source::Aljazeera];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Nyt => "nyt",
            Source::Guardian => "guardian",
            Source::Aljazeera => "aljazeera",
            Source::All => "all",
        }
    }

    /// File name stem of the blob this source writes.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Source::Nyt => "nyt_articles",
            Source::Guardian => "guardian_articles",
            Source::Aljazeera => "aljazeera_articles",
            Source::All => "all_news_articles",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.file_stem())
    }

    /// Directory a run for this source writes into.
    pub fn output_dir_name(&self) -> String {
        format!("{}_articles_output", self.as_str())
    }

    /// Map a blob file name back to the source that wrote it.
    pub fn from_file_name(name: &str) -> Option<Source> {
        [Source::Aljazeera, Source::Guardian, Source::Nyt, Source::All]
            .into_iter()
            .find(|s| name.starts_with(s.file_stem()))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised source name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid source '{0}'. Must be one of: nyt, guardian, aljazeera, all")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "nyt" => Ok(Source::Nyt),
            "guardian" => Ok(Source::Guardian),
            "aljazeera" => Ok(Source::Aljazeera),
            "all" => Ok(Source::All),
            _ => Err(UnknownSource(name)),
        }
    }
}

/// Split a comma separated keyword list into trimmed, lower-cased keywords.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Whether already lower-cased text contains any keyword.
pub fn matches_any(text_lower: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k.as_str()))
}

/// Overall outcome of a fetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
}

impl RunStatus {
    pub fn from_count(count: usize) -> Self {
        if count > 0 {
            RunStatus::Success
        } else {
            RunStatus::Failed
        }
    }
}

/// Result of scraping one source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub saved_articles: usize,
    pub file: PathBuf,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a combined run over every source.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedReport {
    pub saved_articles: usize,
    pub nyt_file: PathBuf,
    pub guardian_file: PathBuf,
    pub aljazeera_file: PathBuf,
    pub combined_file: PathBuf,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parsing() {
        assert_eq!(" NYT ".parse::<Source>(), Ok(Source::Nyt));
        assert_eq!("AlJazeera".parse::<Source>(), Ok(Source::Aljazeera));
        let err = "bbc".parse::<Source>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid source 'bbc'. Must be one of: nyt, guardian, aljazeera, all"
        );
        assert_eq!(" BBC ".parse::<Source>(), Err(UnknownSource("bbc".to_string())));
    }

    #[test]
    fn test_source_file_layout() {
        assert_eq!(Source::Guardian.file_name(), "guardian_articles.txt");
        assert_eq!(Source::All.file_name(), "all_news_articles.txt");
        assert_eq!(Source::Nyt.output_dir_name(), "nyt_articles_output");
        assert_eq!(Source::All.output_dir_name(), "all_articles_output");
    }

    #[test]
    fn test_source_from_file_name() {
        assert_eq!(Source::from_file_name("nyt_articles.txt"), Some(Source::Nyt));
        assert_eq!(
            Source::from_file_name("all_news_articles.txt"),
            Some(Source::All)
        );
        assert_eq!(
            Source::from_file_name("aljazeera_articles_v2.txt"),
            Some(Source::Aljazeera)
        );
        assert_eq!(Source::from_file_name("notes.txt"), None);
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            parse_keywords(" Economy, ,TRADE ,"),
            vec!["economy".to_string(), "trade".to_string()]
        );
        assert!(parse_keywords(" , ").is_empty());
    }

    #[test]
    fn test_matches_any() {
        let kws = parse_keywords("acme,tariff");
        assert!(matches_any("acme corp posts earnings", &kws));
        assert!(!matches_any("nothing relevant", &kws));
        assert!(!matches_any("anything", &[]));
    }

    #[test]
    fn test_run_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RunStatus::from_count(2)).unwrap(), "success");
        assert_eq!(serde_json::to_value(RunStatus::from_count(0)).unwrap(), "failed");
    }
}
