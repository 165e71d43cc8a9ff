// ABOUTME: Al Jazeera scraping over its RSS feeds.
// ABOUTME: Every entry is downloaded; the body can qualify an entry its headline missed.

use std::path::Path;

use super::feed::{FeedEntry, parse_feed};
use super::fetcher::{NewsFetcher, flatten};
use super::{Source, SourceReport, matches_any};
use crate::error::FetchError;
use crate::http::{self, RetryPolicy, retry_with_predicate};

impl NewsFetcher {
    /// Scrape every configured feed for entries matching `keywords`.
    pub async fn scrape_aljazeera(&self, keywords: &[String], dir: &Path) -> SourceReport {
        tracing::info!("Al Jazeera scraping started");

        let policy = RetryPolicy::from(&self.settings.feed_retry);
        let mut articles = Vec::new();

        for (name, url) in &self.settings.aljazeera_feeds {
            let entries = match self.fetch_feed(url, &policy).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::error!(feed = name.as_str(), error = %e, "Error fetching feed, skipping");
                    continue;
                }
            };
            tracing::debug!(feed = name.as_str(), entries = entries.len(), "feed loaded");

            for entry in entries {
                let Some(link) = entry.link.as_deref() else {
                    continue;
                };
                let headline_match = matches_any(&entry.match_text(), keywords);
                let content = self.scraper.scrape(link, Source::Aljazeera).await;

                if !content.is_empty()
                    && (headline_match || matches_any(&content.to_lowercase(), keywords))
                {
                    articles.push(flatten(&content));
                }
                self.pause(self.settings.article_delay_ms).await;
            }
        }

        self.finish(Source::Aljazeera, dir, articles, None)
    }

    async fn fetch_feed(&self, url: &str, policy: &RetryPolicy) -> Result<Vec<FeedEntry>, FetchError> {
        let xml = retry_with_predicate(
            policy,
            || http::get_text(&self.client, url),
            FetchError::is_retryable,
        )
        .await?;
        parse_feed(&xml)
    }
}
