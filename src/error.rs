// ABOUTME: Defines all error types for the coded-tools library using thiserror.
// ABOUTME: Each concern has its own error enum, unified under Error.

/// Top-level error type for the coded-tools library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scratch error: {0}")]
    Scratch(#[from] ScratchError),

    #[error("Sentiment error: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

/// Errors from tool lookup and execution.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

/// Errors from talking to upstream HTTP services.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Daily quota exhausted for {url}")]
    QuotaExhausted { url: String },

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Timeouts, connection failures and `429 Too Many Requests` are
    /// transient; every other status and an exhausted quota are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout() || e.is_connect(),
            FetchError::Status { status, .. } => *status == 429,
            FetchError::QuotaExhausted { .. } | FetchError::Feed(_) | FetchError::Decode(_) => {
                false
            }
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Errors that fail a whole sentiment aggregation run.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    #[error("Invalid source filter '{0}'. Use all, or a comma separated list of nyt, guardian, aljazeera, unknown")]
    InvalidSource(String),

    #[error("Failed to access input directory: {0}")]
    InputDir(#[source] std::io::Error),

    #[error("Failed to write output file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from persisting or restoring a retrieval index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from writing to the shared scratch accumulator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScratchError {
    #[error("Scratch key '{key}' is owned by '{owner}', '{writer}' may not write it")]
    KeyOwned {
        key: String,
        owner: String,
        writer: String,
    },
}

/// Result type alias for coded-tools operations.
pub type Result<T> = std::result::Result<T, Error>;
