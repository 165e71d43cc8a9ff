// ABOUTME: Defines the Tool trait - the contract every coded tool implements.
// ABOUTME: Tools have a name, description, schema, and an async invoke method.

use async_trait::async_trait;

use super::{Scratch, ToolResult};

/// A coded tool that can be invoked by an agent runtime.
///
/// The runtime hands over the tool-specific `args` and the session's
/// [`Scratch`] accumulator. Missing or malformed user input is reported as a
/// [`ToolResult`] message rather than an `Err`; `Err` is reserved for failures
/// the caller cannot act on.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the agent.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's arguments.
    fn schema(&self) -> serde_json::Value;

    /// Invoke the tool with the given arguments.
    async fn invoke(
        &self,
        args: serde_json::Value,
        scratch: &mut Scratch,
    ) -> Result<ToolResult, anyhow::Error>;
}
