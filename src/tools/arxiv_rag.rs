// ABOUTME: ArxivRag tool - loads papers matching a query from arXiv and
// ABOUTME: returns the passages most relevant to it.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{RagSettings, ToolsConfig};
use crate::http;
use crate::rag::{self, ArxivLoader, ArxivOptions};
use crate::tool::{Scratch, Tool, ToolResult};

const END_OF_TEXT: &str = "<|endoftext|>";

/// Tool that answers questions from arXiv abstracts.
pub struct ArxivRagTool {
    loader: ArxivLoader,
    settings: RagSettings,
}

impl ArxivRagTool {
    pub fn new(config: &ToolsConfig) -> Self {
        Self::with_client(config, http::build_client(&config.http))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: &ToolsConfig, client: reqwest::Client) -> Self {
        Self {
            loader: ArxivLoader::new(client, config.rag.arxiv_api_url.clone()),
            settings: config.rag.clone(),
        }
    }
}

#[async_trait]
impl Tool for ArxivRagTool {
    fn name(&self) -> &str {
        "arxiv_rag"
    }

    fn description(&self) -> &str {
        "Search arXiv for papers on a topic and return the passages most relevant to the query."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search string and retrieval question"},
                "top_k_results": {"type": "integer", "default": 3},
                "get_full_documents": {"type": "boolean", "default": true},
                "doc_content_chars_max": {"type": "integer", "default": 4000},
                "load_all_available_meta": {"type": "boolean", "default": false},
                "continue_on_failure": {"type": "boolean", "default": true}
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, args: Value, _scratch: &mut Scratch) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            #[serde(default)]
            query: String,
            #[serde(flatten)]
            options: ArxivOptions,
        }

        let params: Params = serde_json::from_value(args)?;
        let query = params.query.replace(END_OF_TEXT, "");
        if query.trim().is_empty() {
            tracing::error!("Missing required input: 'query' (retrieval question)");
            return Ok(ToolResult::message_error("❌ Missing required input: 'query'."));
        }

        let documents = match self.loader.load(&query, &params.options).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!(error = %e, "arXiv retrieval failed");
                return Ok(ToolResult::message_error(format!("❌ arXiv retrieval failed: {}", e)));
            }
        };

        let answer = rag::answer(&documents, &query, self.settings.chunk_size, self.settings.top_k);
        if answer.is_empty() {
            tracing::warn!(query = query.as_str(), "no relevant arXiv passages");
            return Ok(ToolResult::text(super::NO_RESULTS));
        }
        Ok(ToolResult::text(answer))
    }
}
