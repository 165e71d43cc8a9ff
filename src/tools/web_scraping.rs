// ABOUTME: WebScrapingTechnician - fetches news articles matching keywords
// ABOUTME: from one source or all of them and writes them to text files.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::comma_list;
use crate::config::ToolsConfig;
use crate::news::{NewsFetcher, Source, parse_keywords};
use crate::tool::{Scratch, Tool, ToolResult};

/// Tool that scrapes news sources into keyword-filtered article files.
pub struct WebScrapingTechnician {
    fetcher: NewsFetcher,
}

impl WebScrapingTechnician {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            fetcher: NewsFetcher::new(config),
        }
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: &ToolsConfig, client: reqwest::Client) -> Self {
        Self {
            fetcher: NewsFetcher::with_client(config, client),
        }
    }
}

#[async_trait]
impl Tool for WebScrapingTechnician {
    fn name(&self) -> &str {
        "web_scraping_technician"
    }

    fn description(&self) -> &str {
        "Fetch news articles matching keywords from the NYT, the Guardian, Al Jazeera, or all of them, and save them as text files."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "description": "One of nyt, guardian, aljazeera, all (default: all)",
                    "default": "all"
                },
                "keywords": {
                    "type": "string",
                    "description": "Comma separated keywords to match against headlines and article text"
                }
            },
            "required": ["keywords"]
        })
    }

    async fn invoke(&self, args: Value, _scratch: &mut Scratch) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            #[serde(default = "default_source")]
            source: String,
            #[serde(default)]
            keywords: Option<Value>,
        }

        fn default_source() -> String {
            "all".to_string()
        }

        let params: Params = serde_json::from_value(args)?;

        let keywords = parse_keywords(&comma_list(params.keywords.as_ref()));
        if keywords.is_empty() {
            return Ok(ToolResult::error("Keywords cannot be empty"));
        }

        let source: Source = match params.source.parse() {
            Ok(source) => source,
            Err(e) => return Ok(ToolResult::error(format!("{}", e))),
        };

        tracing::info!(%source, keywords = ?keywords, "scraping news");
        let outcome = self.fetcher.fetch(source, &keywords).await;
        Ok(ToolResult::json(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tool(dir: &TempDir) -> WebScrapingTechnician {
        let mut config = ToolsConfig::default();
        config.news.base_dir = dir.path().to_path_buf();
        WebScrapingTechnician::new(&config)
    }

    #[tokio::test]
    async fn test_empty_keywords() {
        let dir = TempDir::new().unwrap();
        let mut scratch = Scratch::new();

        let result = tool(&dir)
            .invoke(serde_json::json!({"source": "nyt", "keywords": " , "}), &mut scratch)
            .await
            .unwrap();
        assert!(result.is_error);
        assert_eq!(result.content, serde_json::json!({"error": "Keywords cannot be empty"}));

        let result = tool(&dir)
            .invoke(serde_json::json!({}), &mut scratch)
            .await
            .unwrap();
        assert_eq!(result.get("error").unwrap(), "Keywords cannot be empty");
    }

    #[tokio::test]
    async fn test_invalid_source() {
        let dir = TempDir::new().unwrap();
        let result = tool(&dir)
            .invoke(
                serde_json::json!({"source": "BBC", "keywords": "trade"}),
                &mut Scratch::new(),
            )
            .await
            .unwrap();
        assert_eq!(
            result.get("error").unwrap(),
            "Invalid source 'bbc'. Must be one of: nyt, guardian, aljazeera, all"
        );
    }

    #[tokio::test]
    async fn test_missing_key_reports_error_with_zero_count() {
        let dir = TempDir::new().unwrap();
        let result = tool(&dir)
            .invoke(
                serde_json::json!({"source": " NYT ", "keywords": ["Trade"]}),
                &mut Scratch::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.get("saved_articles").unwrap(), 0);
        assert_eq!(result.status(), Some("failed"));
        assert_eq!(result.get("error").unwrap(), "NYT API key is not configured");
        assert!(dir.path().join("nyt_articles_output/nyt_articles.txt").exists());
    }

    #[test]
    fn test_schema() {
        let dir = TempDir::new().unwrap();
        let schema = tool(&dir).schema();
        assert_eq!(schema["required"][0], "keywords");
    }
}
