// ABOUTME: WikipediaRag tool - loads Wikipedia pages for a list of topics,
// ABOUTME: indexes them (optionally persisting the index) and answers a query.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::NO_RESULTS;
use crate::config::{RagSettings, ToolsConfig};
use crate::http;
use crate::rag::{self, Document, LexicalIndex, WikipediaLoader, WikipediaOptions};
use crate::tool::{Scratch, Tool, ToolResult};

/// Tool that answers questions from Wikipedia pages.
pub struct WikipediaRagTool {
    loader: WikipediaLoader,
    settings: RagSettings,
}

impl WikipediaRagTool {
    pub fn new(config: &ToolsConfig) -> Self {
        Self::with_client(config, http::build_client(&config.http))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: &ToolsConfig, client: reqwest::Client) -> Self {
        Self {
            loader: WikipediaLoader::new(client, config.rag.wikipedia_api_url.clone()),
            settings: config.rag.clone(),
        }
    }

    /// Load every topic in turn; a topic that fails is logged and skipped.
    async fn load_documents(&self, topics: &[String], options: &WikipediaOptions) -> Vec<Document> {
        let mut documents = Vec::new();
        for topic in topics {
            tracing::info!(topic = topic.as_str(), "loading Wikipedia docs");
            match self.loader.load(topic, options).await {
                Ok(loaded) => {
                    tracing::info!(topic = topic.as_str(), count = loaded.len(), "loaded Wikipedia docs");
                    documents.extend(loaded);
                }
                Err(e) => {
                    tracing::error!(topic = topic.as_str(), error = %e, "failed to load Wikipedia docs");
                }
            }
        }
        if documents.is_empty() {
            tracing::warn!(topics = ?topics, "no Wikipedia documents were loaded");
        }
        documents
    }

    /// Reuse a persisted index when asked to, otherwise build a fresh one
    /// and persist it if requested.
    async fn index(
        &self,
        topics: &[String],
        options: &WikipediaOptions,
        persist: bool,
        path: &Path,
    ) -> LexicalIndex {
        if persist && path.exists() {
            match LexicalIndex::load(path) {
                Ok(index) => {
                    tracing::info!(path = %path.display(), chunks = index.len(), "loaded vector store");
                    return index;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable vector store, rebuilding");
                }
            }
        }

        let documents = self.load_documents(topics, options).await;
        let index = LexicalIndex::build(rag::chunk_documents(&documents, self.settings.chunk_size));

        if persist && !index.is_empty() {
            match index.save(path) {
                Ok(()) => tracing::info!(path = %path.display(), "saved vector store"),
                Err(e) => tracing::error!(path = %path.display(), error = %e, "failed to save vector store"),
            }
        }
        index
    }
}

/// Topics given either as a list or as a single string.
fn topics(value: Option<&Value>) -> Vec<String> {
    let topics = match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };
    topics
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[async_trait]
impl Tool for WikipediaRagTool {
    fn name(&self) -> &str {
        "wikipedia_rag"
    }

    fn description(&self) -> &str {
        "Load Wikipedia articles on the given topics and return the passages most relevant to the query."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Retrieval question"},
                "wiki_queries": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Wikipedia topics to load"
                },
                "lang": {"type": "string", "default": "en"},
                "load_max_docs": {"type": "integer", "default": 10},
                "doc_content_chars_max": {"type": "integer", "default": 1000},
                "save_vector_store": {"type": "boolean", "default": false},
                "vector_store_path": {"type": "string"}
            },
            "required": ["query", "wiki_queries"]
        })
    }

    async fn invoke(&self, args: Value, _scratch: &mut Scratch) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            #[serde(default)]
            query: String,
            #[serde(default)]
            wiki_queries: Option<Value>,
            #[serde(default)]
            save_vector_store: bool,
            #[serde(default)]
            vector_store_path: Option<PathBuf>,
            #[serde(flatten)]
            options: WikipediaOptions,
        }

        let params: Params = serde_json::from_value(args)?;
        if params.query.trim().is_empty() {
            tracing::error!("Missing required input: 'query' (retrieval question)");
            return Ok(ToolResult::message_error("❌ Missing required input: 'query'."));
        }
        let topics = topics(params.wiki_queries.as_ref());
        if topics.is_empty() {
            tracing::error!("Missing required input: 'wiki_queries' (Wikipedia topics)");
            return Ok(ToolResult::message_error(
                "❌ Missing required input: 'wiki_queries' (list).",
            ));
        }

        let path = params
            .vector_store_path
            .unwrap_or_else(|| self.settings.vector_store_path.clone());
        let index = self
            .index(&topics, &params.options, params.save_vector_store, &path)
            .await;

        let answer = rag::join_results(&index.search(&params.query, self.settings.top_k));
        if answer.is_empty() {
            tracing::warn!(query = params.query.as_str(), "no relevant Wikipedia passages");
            return Ok(ToolResult::text(NO_RESULTS));
        }
        Ok(ToolResult::text(answer))
    }
}
