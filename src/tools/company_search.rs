// ABOUTME: CompanySearchTool - searches organizations by keyword, location,
// ABOUTME: headcount and funding ranges through the Apollo API.

use async_trait::async_trait;
use serde_json::Value;

use crate::apollo::{ApolloClient, CompanySearchArgs};
use crate::config::ToolsConfig;
use crate::tool::{Scratch, Tool, ToolResult};

/// Tool that runs an organization search and returns the upstream JSON.
pub struct CompanySearchTool {
    client: ApolloClient,
}

impl CompanySearchTool {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            client: ApolloClient::new(config),
        }
    }

    pub fn with_client(client: ApolloClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CompanySearchTool {
    fn name(&self) -> &str {
        "company_search"
    }

    fn description(&self) -> &str {
        "Search companies by keyword, location, employee count, revenue and funding."
    }

    fn schema(&self) -> Value {
        let string_list = serde_json::json!({"type": "array", "items": {"type": "string"}});
        serde_json::json!({
            "type": "object",
            "properties": {
                "q_organization_keyword": {"type": "string", "description": "Keyword describing the company"},
                "organization_num_employees_ranges": string_list,
                "organization_locations": string_list,
                "organization_not_locations": string_list,
                "q_organization_keyword_tags": string_list,
                "organization_city": string_list,
                "organization_state": string_list,
                "page": {"type": "integer", "default": 1},
                "per_page": {"type": "integer", "default": 100},
                "revenue_range_min": {"type": "number"},
                "revenue_range_max": {"type": "number"},
                "latest_funding_amount_range_min": {"type": "number"},
                "latest_funding_amount_range_max": {"type": "number"},
                "total_funding_range_min": {"type": "number"},
                "total_funding_range_max": {"type": "number"},
                "latest_funding_date_range_min": {"type": "string", "description": "ISO date"},
                "latest_funding_date_range_max": {"type": "string", "description": "ISO date"}
            }
        })
    }

    async fn invoke(&self, args: Value, _scratch: &mut Scratch) -> Result<ToolResult, anyhow::Error> {
        let args: CompanySearchArgs = serde_json::from_value(args)?;

        match self.client.search_companies(&args).await {
            Ok(data) => Ok(ToolResult::json(data)),
            Err(e) => {
                tracing::error!(error = %e, "company search failed");
                Ok(ToolResult::error(e.to_string()))
            }
        }
    }
}
