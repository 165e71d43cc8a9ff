// ABOUTME: Tool module - defines the tool contract, scratch, registry, and results.
// ABOUTME: Core abstraction for everything the agent runtime can invoke.

mod registry;
mod result;
mod scratch;
mod traits;

pub use registry::*;
pub use result::*;
pub use scratch::*;
pub use traits::*;
