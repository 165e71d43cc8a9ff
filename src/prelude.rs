// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use coded_tools::prelude::*;` to get started quickly.

pub use crate::config::ToolsConfig;
pub use crate::error::{
    ConfigError, Error, FetchError, IndexError, ScratchError, SentimentError, ToolError,
};
pub use crate::news::{NewsFetcher, Source};
pub use crate::sentiment::{PolarityAnalyzer, SentimentAggregator, VaderAnalyzer};
pub use crate::tool::{Registry, Scratch, Tool, ToolDefinition, ToolResult};
pub use crate::tools::{
    ArxivRagTool, CompanySearchTool, ManageRepoEval, PeopleSearchTool, SentimentAnalysisTool,
    WebScrapingTechnician, WikipediaRagTool, default_registry,
};
