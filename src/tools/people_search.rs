// ABOUTME: PeopleSearchTool - finds people by title, seniority, department and
// ABOUTME: location through the Apollo API, returning cleaned and filtered results.

use async_trait::async_trait;
use serde_json::Value;

use crate::apollo::{ApolloClient, PeopleSearchArgs};
use crate::config::ToolsConfig;
use crate::error::ConfigError;
use crate::tool::{Scratch, Tool, ToolResult};

/// Tool that runs a people search. Cannot be built without an API key.
pub struct PeopleSearchTool {
    client: ApolloClient,
}

impl PeopleSearchTool {
    pub fn new(config: &ToolsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: ApolloClient::require_key(config)?,
        })
    }
}

#[async_trait]
impl Tool for PeopleSearchTool {
    fn name(&self) -> &str {
        "people_search"
    }

    fn description(&self) -> &str {
        "Search people with LinkedIn profiles by company keyword, title, seniority, department and location."
    }

    fn schema(&self) -> Value {
        let string_list = serde_json::json!({"type": "array", "items": {"type": "string"}});
        serde_json::json!({
            "type": "object",
            "properties": {
                "q_organization_keyword": {"type": "string", "description": "Company name or keyword"},
                "include_similar_titles": {"type": "boolean", "default": false},
                "person_titles": string_list,
                "person_seniorities": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Defaults to senior, c_suite, vp, director, manager, executive, head"
                },
                "person_departments": string_list,
                "person_locations": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Countries the person must be located in"
                },
                "organization_not_locations": string_list,
                "page": {"type": "integer", "default": 1},
                "per_page": {"type": "integer", "default": 80}
            }
        })
    }

    async fn invoke(&self, args: Value, _scratch: &mut Scratch) -> Result<ToolResult, anyhow::Error> {
        let args: PeopleSearchArgs = serde_json::from_value(args)?;

        match self.client.search_people(&args).await {
            Ok(data) => Ok(ToolResult::json(data)),
            Err(e) => {
                tracing::error!(error = %e, "people search failed");
                Ok(ToolResult::error(e.to_string()))
            }
        }
    }
}
