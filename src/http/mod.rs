// ABOUTME: HTTP plumbing shared by the network-backed tools.
// ABOUTME: Client construction, status-checked fetches, retry and rate-limit helpers.

pub mod rate_limit;
pub mod retry;

pub use rate_limit::RateLimitSignal;
pub use retry::{RetryPolicy, retry_with_predicate};

use crate::config::HttpSettings;
use crate::error::FetchError;

/// Build the reqwest client a tool keeps for its lifetime.
pub fn build_client(settings: &HttpSettings) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(settings.timeout())
        .user_agent(settings.user_agent.clone())
        .build()
        .expect("Failed to create HTTP client")
}

/// GET a URL and return its body, treating non-2xx statuses as errors.
pub async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}
