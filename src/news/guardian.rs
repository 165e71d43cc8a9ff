// ABOUTME: Guardian scraping over the keyword search API.
// ABOUTME: One search per keyword; API body text backs up failed page scrapes.

use std::path::Path;

use serde::Deserialize;

use super::fetcher::{NewsFetcher, flatten};
use super::{Source, SourceReport};
use crate::error::FetchError;
use crate::http::{RetryPolicy, retry_with_predicate};

#[derive(Debug, Default, Deserialize)]
pub struct GuardianEnvelope {
    #[serde(default)]
    pub response: GuardianResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct GuardianResponse {
    #[serde(default)]
    pub results: Vec<GuardianItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianItem {
    pub web_url: Option<String>,
    pub web_title: Option<String>,
    pub fields: Option<GuardianFields>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianFields {
    pub body_text: Option<String>,
}

impl GuardianItem {
    fn body_text(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.body_text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl NewsFetcher {
    /// Search the Guardian once per keyword and scrape every hit.
    pub async fn scrape_guardian(&self, keywords: &[String], dir: &Path) -> SourceReport {
        tracing::info!("Guardian scraping started");

        let Some(api_key) = self.credentials.guardian_api_key.as_deref() else {
            tracing::error!("Guardian API key is not configured, skipping Guardian");
            return self.finish(
                Source::Guardian,
                dir,
                Vec::new(),
                Some("Guardian API key is not configured".to_string()),
            );
        };

        let policy = RetryPolicy::from(&self.settings.feed_retry);
        let mut articles = Vec::new();

        for keyword in keywords {
            let results = match self.search_guardian(keyword, api_key, &policy).await {
                Ok(envelope) => envelope.response.results,
                Err(e) => {
                    tracing::error!(keyword = keyword.as_str(), error = %e, "Guardian search failed, skipping keyword");
                    continue;
                }
            };

            for item in results {
                let Some(link) = item.web_url.as_deref() else {
                    continue;
                };
                let mut content = self.scraper.scrape(link, Source::Guardian).await;
                if content.is_empty() {
                    if let Some(body) = item.body_text() {
                        tracing::debug!(url = link, "using API body text for article");
                        content = body.to_string();
                    }
                }
                if !content.is_empty() {
                    articles.push(flatten(&content));
                }
                self.pause(self.settings.article_delay_ms).await;
            }
        }

        self.finish(Source::Guardian, dir, articles, None)
    }

    async fn search_guardian(
        &self,
        keyword: &str,
        api_key: &str,
        policy: &RetryPolicy,
    ) -> Result<GuardianEnvelope, FetchError> {
        let page_size = self.settings.guardian_page_size.to_string();
        let page_size = page_size.as_str();
        let url = self.settings.guardian_base_url.as_str();
        retry_with_predicate(
            policy,
            move || async move {
                let response = self
                    .client
                    .get(url)
                    .query(&[
                        ("q", keyword),
                        ("api-key", api_key),
                        ("page-size", page_size),
                        ("show-fields", "bodyText"),
                    ])
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                response
                    .json::<GuardianEnvelope>()
                    .await
                    .map_err(|e| FetchError::Decode(e.to_string()))
            },
            FetchError::is_retryable,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parsing() {
        let envelope: GuardianEnvelope = serde_json::from_value(serde_json::json!({
            "response": {
                "status": "ok",
                "results": [
                    {
                        "webUrl": "https://guardian/a",
                        "webTitle": "Trade talks",
                        "fields": {"bodyText": "  Full text.  "}
                    },
                    {"webUrl": "https://guardian/b"}
                ]
            }
        }))
        .unwrap();

        let results = envelope.response.results;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].body_text(), Some("Full text."));
        assert_eq!(results[1].body_text(), None);
    }

    #[test]
    fn test_empty_envelope() {
        let envelope: GuardianEnvelope = serde_json::from_str(r#"{"message": "Unauthorized"}"#).unwrap();
        assert!(envelope.response.results.is_empty());
    }
}
