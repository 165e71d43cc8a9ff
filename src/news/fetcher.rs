// ABOUTME: NewsFetcher - runs a scrape for one source or all of them and
// ABOUTME: writes the newline-joined article blobs to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use super::scrape::ArticleScraper;
use super::{CombinedReport, RunStatus, Source, SourceReport};
use crate::config::{CredentialSettings, NewsSettings, ToolsConfig};
use crate::http;

/// Outcome of a fetch run, shaped like the tool response.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FetchOutcome {
    Single(SourceReport),
    Combined(CombinedReport),
}

impl FetchOutcome {
    pub fn saved_articles(&self) -> usize {
        match self {
            FetchOutcome::Single(r) => r.saved_articles,
            FetchOutcome::Combined(r) => r.saved_articles,
        }
    }

    pub fn status(&self) -> RunStatus {
        match self {
            FetchOutcome::Single(r) => r.status,
            FetchOutcome::Combined(r) => r.status,
        }
    }
}

/// Scrapes the configured news sources.
///
/// Every network call is awaited in turn; pacing between requests comes from
/// fixed pauses, not from concurrency limits.
pub struct NewsFetcher {
    pub(super) client: reqwest::Client,
    pub(super) scraper: ArticleScraper,
    pub(super) settings: NewsSettings,
    pub(super) credentials: CredentialSettings,
}

impl NewsFetcher {
    pub fn new(config: &ToolsConfig) -> Self {
        Self::with_client(config, http::build_client(&config.http))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: &ToolsConfig, client: reqwest::Client) -> Self {
        Self {
            scraper: ArticleScraper::new(client.clone()),
            client,
            settings: config.news.clone(),
            credentials: config.credentials.clone(),
        }
    }

    /// Directory a run for `source` writes into.
    pub fn output_dir(&self, source: Source) -> PathBuf {
        self.settings.base_dir.join(source.output_dir_name())
    }

    /// Scrape `source` for articles matching `keywords`.
    pub async fn fetch(&self, source: Source, keywords: &[String]) -> FetchOutcome {
        let dir = self.output_dir(source);
        match source {
            Source::Nyt => FetchOutcome::Single(self.scrape_nyt(keywords, &dir).await),
            Source::Guardian => FetchOutcome::Single(self.scrape_guardian(keywords, &dir).await),
            Source::Aljazeera => {
                FetchOutcome::Single(self.scrape_aljazeera(keywords, &dir).await)
            }
            Source::All => FetchOutcome::Combined(self.scrape_all(keywords, &dir).await),
        }
    }

    /// Run every single source into `dir`, then concatenate their blobs.
    ///
    /// Lines are copied as they are; articles appearing in several sources
    /// are not de-duplicated.
    pub async fn scrape_all(&self, keywords: &[String], dir: &Path) -> CombinedReport {
        let nyt = self.scrape_nyt(keywords, dir).await;
        let guardian = self.scrape_guardian(keywords, dir).await;
        let aljazeera = self.scrape_aljazeera(keywords, dir).await;

        let mut lines = Vec::new();
        for report in [&nyt, &guardian, &aljazeera] {
            match std::fs::read_to_string(&report.file) {
                Ok(text) => lines.extend(
                    text.lines()
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .map(String::from),
                ),
                Err(e) => {
                    tracing::warn!(file = %report.file.display(), error = %e, "skipping unreadable source file");
                }
            }
        }

        let combined_file = dir.join(Source::All.file_name());
        let error = write_blob(&combined_file, &lines)
            .err()
            .map(|e| format!("Failed to write {}: {}", combined_file.display(), e));

        tracing::info!(saved = lines.len(), file = %combined_file.display(), "combined scrape finished");
        CombinedReport {
            saved_articles: lines.len(),
            nyt_file: nyt.file,
            guardian_file: guardian.file,
            aljazeera_file: aljazeera.file,
            combined_file,
            status: RunStatus::from_count(lines.len()),
            error,
        }
    }

    /// Write the collected articles for `source` and build its report.
    pub(super) fn finish(
        &self,
        source: Source,
        dir: &Path,
        articles: Vec<String>,
        error: Option<String>,
    ) -> SourceReport {
        let file = dir.join(source.file_name());
        let error = match write_blob(&file, &articles) {
            Ok(()) => error,
            Err(e) => {
                tracing::error!(file = %file.display(), error = %e, "failed to write articles");
                Some(format!("Failed to write {}: {}", file.display(), e))
            }
        };

        tracing::info!(%source, saved = articles.len(), file = %file.display(), "scrape finished");
        SourceReport {
            saved_articles: articles.len(),
            file,
            status: RunStatus::from_count(articles.len()),
            error,
        }
    }

    pub(super) async fn pause(&self, millis: u64) {
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

/// One article per line, newlines inside an article flattened to spaces.
pub(super) fn flatten(article: &str) -> String {
    article.replace(['\r', '\n'], " ")
}

/// Write articles newline-joined with a trailing newline; no articles writes
/// an empty file.
fn write_blob(path: &Path, articles: &[String]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut content = articles.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_blob() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("x.txt");

        write_blob(&path, &["one".to_string(), "two".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");

        write_blob(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten("a\nb\r\nc"), "a b  c");
    }

    #[test]
    fn test_output_dir() {
        let mut config = ToolsConfig::default();
        config.news.base_dir = PathBuf::from("/data");
        let fetcher = NewsFetcher::new(&config);
        assert_eq!(
            fetcher.output_dir(Source::Guardian),
            PathBuf::from("/data/guardian_articles_output")
        );
    }
}
