// ABOUTME: New York Times scraping over the sectioned Top Stories API.
// ABOUTME: Honors advertised rate-limit resets and retries transient failures.

use std::path::Path;

use reqwest::StatusCode;
use serde::Deserialize;

use super::fetcher::{NewsFetcher, flatten};
use super::{Source, SourceReport, matches_any};
use crate::error::FetchError;
use crate::http::rate_limit::wait_for_reset;
use crate::http::{RateLimitSignal, RetryPolicy, retry_with_predicate};

/// One page of the Top Stories API.
#[derive(Debug, Default, Deserialize)]
pub struct TopStoriesResponse {
    #[serde(default)]
    pub results: Vec<TopStory>,
}

/// A Top Stories listing entry. Only the fields used for matching are kept.
#[derive(Debug, Default, Deserialize)]
pub struct TopStory {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub url: Option<String>,
}

impl TopStory {
    /// Lower-cased `title + " " + abstract`.
    pub fn match_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.summary.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}

impl NewsFetcher {
    /// Scrape every configured NYT section for stories matching `keywords`.
    pub async fn scrape_nyt(&self, keywords: &[String], dir: &Path) -> SourceReport {
        tracing::info!("NYT scraping started");

        let Some(api_key) = self.credentials.nyt_api_key.as_deref() else {
            tracing::error!("NYT API key is not configured, skipping NYT");
            return self.finish(
                Source::Nyt,
                dir,
                Vec::new(),
                Some("NYT API key is not configured".to_string()),
            );
        };

        let policy = RetryPolicy::from(&self.settings.section_retry);
        let base = self.settings.nyt_base_url.trim_end_matches('/');
        let mut articles = Vec::new();

        for (i, section) in self.settings.nyt_sections.iter().enumerate() {
            let url = format!("{}/{}.json", base, section);

            match self.fetch_nyt_section(&url, api_key, &policy).await {
                Ok(page) => {
                    for story in page.results {
                        if !matches_any(&story.match_text(), keywords) {
                            continue;
                        }
                        let Some(link) = story.url.as_deref() else {
                            continue;
                        };
                        let content = self.scraper.scrape(link, Source::Nyt).await;
                        if !content.is_empty() {
                            articles.push(flatten(&content));
                        }
                        self.pause(self.settings.article_delay_ms).await;
                    }
                }
                Err(e) => {
                    tracing::error!(section = section.as_str(), error = %e, "Error in NYT section, skipping");
                }
            }

            if i + 1 < self.settings.nyt_sections.len() {
                self.pause(self.settings.section_delay_ms).await;
            }
        }

        self.finish(Source::Nyt, dir, articles, None)
    }

    async fn fetch_nyt_section(
        &self,
        url: &str,
        api_key: &str,
        policy: &RetryPolicy,
    ) -> Result<TopStoriesResponse, FetchError> {
        retry_with_predicate(
            policy,
            || self.fetch_nyt_section_once(url, api_key),
            FetchError::is_retryable,
        )
        .await
    }

    /// One section request. A 429 that names its reset time is waited out
    /// and retried once here; a 429 with no quota left and no reset fails.
    async fn fetch_nyt_section_once(
        &self,
        url: &str,
        api_key: &str,
    ) -> Result<TopStoriesResponse, FetchError> {
        let request = || self.client.get(url).query(&[("api-key", api_key)]);

        let mut response = request().send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            match RateLimitSignal::from_headers(response.headers()) {
                RateLimitSignal::WaitUntil(reset) => {
                    let grace = std::time::Duration::from_secs(self.settings.rate_limit_grace_secs);
                    let wait = wait_for_reset(reset, chrono::Utc::now().timestamp(), grace);
                    tracing::warn!(url, wait_secs = wait.as_secs(), "Rate limit hit, waiting for reset");
                    tokio::time::sleep(wait).await;
                    response = request().send().await?;
                }
                RateLimitSignal::Exhausted => {
                    return Err(FetchError::QuotaExhausted {
                        url: url.to_string(),
                    });
                }
                RateLimitSignal::Unspecified => {}
            }
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<TopStoriesResponse>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
