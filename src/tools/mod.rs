// ABOUTME: The coded tools exposed to agents: news scraping, sentiment,
// ABOUTME: market research, repository evaluation, and retrieval.

mod arxiv_rag;
mod company_search;
mod manage_repo_eval;
mod people_search;
mod sentiment_analysis;
mod web_scraping;
mod wikipedia_rag;

pub use arxiv_rag::ArxivRagTool;
pub use company_search::CompanySearchTool;
pub use manage_repo_eval::{EVALUATION_KEY, ManageRepoEval, SCORE_KEYS};
pub use people_search::PeopleSearchTool;
pub use sentiment_analysis::SentimentAnalysisTool;
pub use web_scraping::WebScrapingTechnician;
pub use wikipedia_rag::WikipediaRagTool;

use serde_json::Value;

use crate::config::ToolsConfig;
use crate::tool::Registry;

/// Answer returned when retrieval finds nothing relevant.
pub const NO_RESULTS: &str = "No relevant documents found.";

/// Build a registry holding every tool `config` allows.
///
/// The people search tool needs an API key up front; without one it is left
/// out and a warning is logged.
pub async fn default_registry(config: &ToolsConfig) -> Registry {
    let registry = Registry::new();
    registry.register(WebScrapingTechnician::new(config)).await;
    registry.register(SentimentAnalysisTool::new(config)).await;
    registry.register(CompanySearchTool::new(config)).await;
    match PeopleSearchTool::new(config) {
        Ok(tool) => registry.register(tool).await,
        Err(e) => tracing::warn!(error = %e, "people_search disabled"),
    }
    registry.register(ManageRepoEval::new()).await;
    registry.register(ArxivRagTool::new(config)).await;
    registry.register(WikipediaRagTool::new(config)).await;
    registry
}

/// A keyword argument given as a comma separated string or as a list,
/// normalised to the comma separated form.
fn comma_list(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    }
}
