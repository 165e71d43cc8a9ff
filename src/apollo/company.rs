// ABOUTME: Organization search arguments and the request payload built from them.
// ABOUTME: Empty lists and unset values are left out of the payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool arguments for an organization search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanySearchArgs {
    pub q_organization_keyword: Option<String>,
    pub organization_num_employees_ranges: Vec<String>,
    pub organization_locations: Vec<String>,
    pub organization_not_locations: Vec<String>,
    pub q_organization_keyword_tags: Vec<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub organization_city: Vec<String>,
    pub organization_state: Vec<String>,
    pub revenue_range_min: Option<Value>,
    pub revenue_range_max: Option<Value>,
    pub latest_funding_amount_range_min: Option<Value>,
    pub latest_funding_amount_range_max: Option<Value>,
    pub total_funding_range_min: Option<Value>,
    pub total_funding_range_max: Option<Value>,
    pub latest_funding_date_range_min: Option<Value>,
    pub latest_funding_date_range_max: Option<Value>,
}

/// A `{min, max}` bound; either side may be null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Range {
    pub min: Option<Value>,
    pub max: Option<Value>,
}

impl Range {
    /// A range when at least one bound is meaningfully set.
    fn from_bounds(min: &Option<Value>, max: &Option<Value>) -> Option<Self> {
        let set = |v: &Option<Value>| v.as_ref().is_some_and(is_set);
        if !set(min) && !set(max) {
            return None;
        }
        Some(Self {
            min: min.clone(),
            max: max.clone(),
        })
    }
}

/// Zero, false, and empty strings count as unset.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Body of `POST organizations/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySearchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_organization_keyword: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_num_employees_ranges: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_locations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_not_locations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub q_organization_keyword_tags: Vec<String>,
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_city: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_state: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_funding_amount_range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_funding_range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_funding_date_range: Option<Range>,
}

impl From<&CompanySearchArgs> for CompanySearchPayload {
    fn from(args: &CompanySearchArgs) -> Self {
        Self {
            q_organization_keyword: args.q_organization_keyword.clone(),
            organization_num_employees_ranges: args.organization_num_employees_ranges.clone(),
            organization_locations: args.organization_locations.clone(),
            organization_not_locations: args.organization_not_locations.clone(),
            q_organization_keyword_tags: args.q_organization_keyword_tags.clone(),
            page: args.page.unwrap_or(1),
            per_page: args.per_page.unwrap_or(100),
            organization_city: args.organization_city.clone(),
            organization_state: args.organization_state.clone(),
            revenue_range: Range::from_bounds(&args.revenue_range_min, &args.revenue_range_max),
            latest_funding_amount_range: Range::from_bounds(
                &args.latest_funding_amount_range_min,
                &args.latest_funding_amount_range_max,
            ),
            total_funding_range: Range::from_bounds(
                &args.total_funding_range_min,
                &args.total_funding_range_max,
            ),
            latest_funding_date_range: Range::from_bounds(
                &args.latest_funding_date_range_min,
                &args.latest_funding_date_range_max,
            ),
        }
    }
}
