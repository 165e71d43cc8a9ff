// ABOUTME: Apollo API client for company and people searches.
// ABOUTME: Builds JSON payloads from tool arguments and POSTs them with the API key.

mod company;
mod people;

pub use company::{CompanySearchArgs, CompanySearchPayload, Range};
pub use people::{
    DEFAULT_SENIORITIES, PeopleSearchArgs, PeopleSearchPayload, clean_person, clean_response,
    matches_all_filters,
};

use serde::Serialize;
use serde_json::Value;

use crate::config::ToolsConfig;
use crate::error::{ConfigError, FetchError};
use crate::http;

const ORGANIZATIONS_PATH: &str = "organizations/search";
const PEOPLE_PATH: &str = "mixed_people/search";

/// Thin client over the Apollo search endpoints.
#[derive(Clone)]
pub struct ApolloClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApolloClient {
    /// Create a client. A missing key is logged; requests then go out
    /// unauthenticated and fail upstream.
    pub fn new(config: &ToolsConfig) -> Self {
        Self::with_client(config, http::build_client(&config.http))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: &ToolsConfig, client: reqwest::Client) -> Self {
        let api_key = config.credentials.apollo_api_key.clone();
        if api_key.is_none() {
            tracing::error!("APOLLO_API_KEY is not set");
        }
        Self {
            http: client,
            base_url: config.apollo.base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Create a client that refuses to exist without a key.
    pub fn require_key(config: &ToolsConfig) -> Result<Self, ConfigError> {
        if config.credentials.apollo_api_key.is_none() {
            return Err(ConfigError::MissingCredential("APOLLO_API_KEY"));
        }
        Ok(Self::new(config))
    }

    /// Search organizations.
    pub async fn search_companies(&self, args: &CompanySearchArgs) -> Result<Value, FetchError> {
        let payload = CompanySearchPayload::from(args);
        self.post(ORGANIZATIONS_PATH, &payload).await
    }

    /// Search people, then strip and filter the response.
    pub async fn search_people(&self, args: &PeopleSearchArgs) -> Result<Value, FetchError> {
        let payload = PeopleSearchPayload::from(args);
        tracing::info!(payload = %serde_json::to_string(&payload).unwrap_or_default(), "Payload for people search");

        let mut data = self.post(PEOPLE_PATH, &payload).await?;
        let people = clean_response(&mut data);
        let kept: Vec<Value> = people
            .into_iter()
            .filter(|p| matches_all_filters(p, args))
            .collect();
        tracing::debug!(count = kept.len(), "people after filtering");

        if let Some(map) = data.as_object_mut() {
            map.insert("people".to_string(), Value::Array(kept));
        }
        Ok(data)
    }

    async fn post(&self, path: &str, payload: &impl Serialize) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self
            .http
            .post(&url)
            .header("accept", "application/json")
            .header("Cache-Control", "no-cache")
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
