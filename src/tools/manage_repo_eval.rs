// ABOUTME: ManageRepoEval tool - merges repository evaluation scores into the
// ABOUTME: session scratch, appending descriptions rather than replacing them.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::tool::{Scratch, Tool, ToolResult};

/// Scratch key the evaluation is published under.
pub const EVALUATION_KEY: &str = "evaluation";

/// Score keys tracked for every evaluated repository.
pub const SCORE_KEYS: [&str; 7] = [
    "repo_innovation_score",
    "repo_ux_score",
    "repo_scalability_score",
    "repo_market_potential_score",
    "repo_ease_of_implementation_score",
    "repo_financial_feasibility_score",
    "repo_complexity_score",
];

const DESCRIPTION_KEY: &str = "repo_description";

/// Tool that accumulates a repository evaluation across calls.
#[derive(Debug, Default)]
pub struct ManageRepoEval;

impl ManageRepoEval {
    pub fn new() -> Self {
        Self
    }

    fn blank_evaluation() -> Map<String, Value> {
        SCORE_KEYS
            .iter()
            .map(|k| (k.to_string(), Value::Null))
            .collect()
    }

    /// Fold `args` into `current`: given scores overwrite, a description is
    /// appended on a new line.
    pub fn merge(current: Option<&Value>, args: &Value) -> Map<String, Value> {
        let mut evaluation = match current {
            Some(Value::Object(map)) => map.clone(),
            _ => Self::blank_evaluation(),
        };

        for key in SCORE_KEYS {
            if let Some(value) = args.get(key) {
                evaluation.insert(key.to_string(), value.clone());
            }
        }

        if let Some(addition) = args.get(DESCRIPTION_KEY) {
            let merged = match (evaluation.get(DESCRIPTION_KEY), addition) {
                (Some(Value::String(existing)), Value::String(new)) => {
                    Value::String(format!("{}\n{}", existing, new))
                }
                _ => addition.clone(),
            };
            evaluation.insert(DESCRIPTION_KEY.to_string(), merged);
        }

        evaluation
    }
}

#[async_trait]
impl Tool for ManageRepoEval {
    fn name(&self) -> &str {
        "manage_repo_eval"
    }

    fn description(&self) -> &str {
        "Record repository evaluation scores and description, merging them with any earlier evaluation."
    }

    fn schema(&self) -> Value {
        let mut properties = Map::new();
        for key in SCORE_KEYS {
            properties.insert(key.to_string(), serde_json::json!({"type": "number"}));
        }
        properties.insert(
            DESCRIPTION_KEY.to_string(),
            serde_json::json!({"type": "string", "description": "Text appended to the running description"}),
        );
        serde_json::json!({"type": "object", "properties": properties})
    }

    async fn invoke(&self, args: Value, scratch: &mut Scratch) -> Result<ToolResult, anyhow::Error> {
        let evaluation = Self::merge(scratch.get(EVALUATION_KEY), &args);
        tracing::debug!(keys = evaluation.len(), "evaluation updated");

        scratch.publish(self.name(), EVALUATION_KEY, Value::Object(evaluation.clone()))?;
        Ok(ToolResult::json(serde_json::json!({ "updated_evaluation": evaluation })))
    }
}
