// ABOUTME: SentimentAnalysis tool - scores keyword sentences in the scraped
// ABOUTME: article files and writes a per-source JSON summary.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::comma_list;
use crate::config::ToolsConfig;
use crate::news::parse_keywords;
use crate::sentiment::SentimentAggregator;
use crate::tool::{Scratch, Tool, ToolResult};

/// Tool that aggregates sentence-level sentiment over article files.
pub struct SentimentAnalysisTool {
    aggregator: Arc<SentimentAggregator>,
}

impl SentimentAnalysisTool {
    pub fn new(config: &ToolsConfig) -> Self {
        Self::with_aggregator(SentimentAggregator::new(config))
    }

    /// Use a preconfigured aggregator, e.g. one with another analyzer.
    pub fn with_aggregator(aggregator: SentimentAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

#[async_trait]
impl Tool for SentimentAnalysisTool {
    fn name(&self) -> &str {
        "sentiment_analysis"
    }

    fn description(&self) -> &str {
        "Score the sentiment of sentences mentioning the keywords in previously scraped news articles."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "description": "Comma separated sources to include: nyt, guardian, aljazeera, unknown, or all (default: all)",
                    "default": "all"
                },
                "keywords": {
                    "type": "string",
                    "description": "Comma separated keywords selecting the sentences to score"
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
            tracing::warn!("no keywords given, no sentence will match");
        }

        let aggregator = Arc::clone(&self.aggregator);
        let source = params.source;
        let outcome = tokio::task::spawn_blocking(move || aggregator.run(&source, &keywords)).await?;

        match outcome {
            Ok(report) => Ok(ToolResult::json(report).with_field("status", "success")),
            Err(e) => {
                tracing::error!(error = %e, "sentiment analysis failed");
                Ok(ToolResult::failed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tool(base: &TempDir) -> SentimentAnalysisTool {
        let mut config = ToolsConfig::default();
        config.news.base_dir = base.path().to_path_buf();
        SentimentAnalysisTool::new(&config)
    }

    #[tokio::test]
    async fn test_scores_matching_sentences() {
        let base = TempDir::new().unwrap();
        let input = base.path().join("all_articles_output");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(
            input.join("nyt_articles.txt"),
            "Markets rallied as Acme Corp posted strong earnings.\n",
        )
        .unwrap();

        let result = tool(&base)
            .invoke(
                serde_json::json!({"source": "NYT", "keywords": "acme"}),
                &mut Scratch::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.status(), Some("success"));
        let output_file = base.path().join("sentiment_output/sentiment_nyt.json");
        assert_eq!(
            result.get("output_file").unwrap(),
            output_file.to_string_lossy().as_ref()
        );
        assert!(output_file.exists());

        let summary = &result.get("sentiment_score_summary").unwrap()["nyt_articles.txt"];
        assert!(summary["avg_compound"].as_f64().unwrap() >= 0.0);
        let articles = result.get("articles").unwrap().as_array().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0]["sentences"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_input_directory_fails() {
        let base = TempDir::new().unwrap();
        let result = tool(&base)
            .invoke(serde_json::json!({"keywords": "acme"}), &mut Scratch::new())
            .await
            .unwrap();

        assert!(result.is_error);
        assert_eq!(result.status(), Some("failed"));
        let error = result.get("error").unwrap().as_str().unwrap();
        assert!(error.starts_with("Failed to access input directory: "));
    }

    #[tokio::test]
    async fn test_invalid_source_fails_without_writing() {
        let base = TempDir::new().unwrap();
        std::fs::create_dir_all(base.path().join("all_articles_output")).unwrap();

        let result = tool(&base)
            .invoke(
                serde_json::json!({"source": "../escaped", "keywords": "acme"}),
                &mut Scratch::new(),
            )
            .await
            .unwrap();

        assert!(result.is_error);
        assert_eq!(result.status(), Some("failed"));
        let error = result.get("error").unwrap().as_str().unwrap();
        assert!(error.starts_with("Invalid source filter '../escaped'"));
        assert!(!base.path().join("sentiment_output").exists());
    }
}
