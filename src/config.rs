// ABOUTME: Configuration for the coded tools: credentials, endpoints, directories, pacing.
// ABOUTME: Loaded from TOML and handed to tool constructors; only with_env_credentials reads the environment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub credentials: CredentialSettings,
    pub http: HttpSettings,
    pub news: NewsSettings,
    pub sentiment: SentimentSettings,
    pub apollo: ApolloSettings,
    pub rag: RagSettings,
}

impl ToolsConfig {
    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Fill unset credentials from `NYT_API_KEY`, `GUARDIAN_API_KEY` and
    /// `APOLLO_API_KEY`. Values already present in the config win.
    pub fn with_env_credentials(mut self) -> Self {
        let creds = &mut self.credentials;
        if creds.nyt_api_key.is_none() {
            creds.nyt_api_key = std::env::var("NYT_API_KEY").ok();
        }
        if creds.guardian_api_key.is_none() {
            creds.guardian_api_key = std::env::var("GUARDIAN_API_KEY").ok();
        }
        if creds.apollo_api_key.is_none() {
            creds.apollo_api_key = std::env::var("APOLLO_API_KEY").ok();
        }
        self
    }

    /// Directory the sentiment aggregator scans.
    pub fn sentiment_input_dir(&self) -> PathBuf {
        self.sentiment
            .input_dir
            .clone()
            .unwrap_or_else(|| self.news.base_dir.join("all_articles_output"))
    }

    /// Directory the sentiment aggregator writes into.
    pub fn sentiment_output_dir(&self) -> PathBuf {
        self.sentiment
            .output_dir
            .clone()
            .unwrap_or_else(|| self.news.base_dir.join("sentiment_output"))
    }
}

/// API keys for upstream services.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
    pub nyt_api_key: Option<String>,
    pub guardian_api_key: Option<String>,
    pub apollo_api_key: Option<String>,
}

impl std::fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(v: &Option<String>) -> &'static str {
            if v.is_some() { "set" } else { "not set" }
        }
        f.debug_struct("CredentialSettings")
            .field("nyt_api_key", &mask(&self.nyt_api_key))
            .field("guardian_api_key", &mask(&self.guardian_api_key))
            .field("apollo_api_key", &mask(&self.apollo_api_key))
            .finish()
    }
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: "Mozilla/5.0 (compatible; coded-tools/0.3)".to_string(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Bounded exponential backoff budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts, including the first.
    pub max_attempts: usize,
    /// Wall-clock budget across all attempts, in seconds.
    pub max_elapsed_secs: u64,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_elapsed_secs: 30,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// News scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    /// Root under which `<source>_articles_output/` directories are created.
    pub base_dir: PathBuf,
    pub nyt_base_url: String,
    pub nyt_sections: Vec<String>,
    pub guardian_base_url: String,
    pub guardian_page_size: u32,
    /// Feed name to RSS URL.
    pub aljazeera_feeds: BTreeMap<String, String>,
    /// Pause between article downloads.
    pub article_delay_ms: u64,
    /// Pause between API sections.
    pub section_delay_ms: u64,
    /// Extra wait added to an advertised rate-limit reset time.
    pub rate_limit_grace_secs: u64,
    pub section_retry: RetrySettings,
    pub feed_retry: RetrySettings,
}

impl Default for NewsSettings {
    fn default() -> Self {
        let sections = [
            "arts",
            "business",
            "climate",
            "education",
            "health",
            "jobs",
            "opinion",
            "politics",
            "realestate",
            "science",
            "technology",
            "travel",
            "us",
            "world",
        ];
        let mut feeds = BTreeMap::new();
        feeds.insert(
            "world".to_string(),
            "https://www.aljazeera.com/xml/rss/all.xml".to_string(),
        );

        Self {
            base_dir: PathBuf::from("."),
            nyt_base_url: "https://api.nytimes.com/svc/topstories/v2".to_string(),
            nyt_sections: sections.iter().map(|s| s.to_string()).collect(),
            guardian_base_url: "https://content.guardianapis.com/search".to_string(),
            guardian_page_size: 50,
            aljazeera_feeds: feeds,
            article_delay_ms: 500,
            section_delay_ms: 6_000,
            rate_limit_grace_secs: 2,
            section_retry: RetrySettings {
                max_attempts: 10,
                max_elapsed_secs: 300,
                initial_delay_ms: 1_000,
                max_delay_ms: 60_000,
            },
            feed_retry: RetrySettings::default(),
        }
    }
}

/// Sentiment aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSettings {
    /// Defaults to `<news.base_dir>/all_articles_output`.
    pub input_dir: Option<PathBuf>,
    /// Defaults to `<news.base_dir>/sentiment_output`.
    pub output_dir: Option<PathBuf>,
    /// Cap on sentence records written per file.
    pub max_sentences: usize,
    /// Characters of source text kept as a preview.
    pub snippet_chars: usize,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            max_sentences: 300,
            snippet_chars: 200,
        }
    }
}

/// People/company search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApolloSettings {
    pub base_url: String,
}

impl Default for ApolloSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.apollo.io/api/v1".to_string(),
        }
    }
}

/// Retrieval tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    pub arxiv_api_url: String,
    /// `{lang}` is replaced by the requested language code.
    pub wikipedia_api_url: String,
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Chunks returned per query.
    pub top_k: usize,
    /// Where a persisted Wikipedia index lives when the caller names none.
    pub vector_store_path: PathBuf,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            arxiv_api_url: "https://export.arxiv.org/api/query".to_string(),
            wikipedia_api_url: "https://{lang}.wikipedia.org/w/api.php".to_string(),
            chunk_size: 1000,
            top_k: 4,
            vector_store_path: PathBuf::from("wikipedia_vector_store.json"),
        }
    }
}

impl RagSettings {
    pub fn wikipedia_url(&self, lang: &str) -> String {
        self.wikipedia_api_url.replace("{lang}", lang)
    }
}
