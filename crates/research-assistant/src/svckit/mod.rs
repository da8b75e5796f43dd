//! Service Kit - Agent Tools
//!
//! Tools that implement `agent_core::Tool` for the research assistant.

mod definition;
mod search;
mod summarize;

pub use definition::{DefinitionArgs, DefinitionTool, lookup_definition};
pub use search::{NO_RESULTS_SENTINEL, SearchArgs, SearchTool};
pub use summarize::{SummarizeArgs, SummarizeTool, summarize};

use serde::de::DeserializeOwned;

use agent_core::ToolArgs;

use crate::error::{ResearchError, Result};

pub const SEARCH_TOOL: &str = "search_web";
pub const DEFINE_TOOL: &str = "lookup_definition";
pub const SUMMARIZE_TOOL: &str = "summarize";

/// Decode a call's argument map into the tool's typed arguments
fn parse_args<T: DeserializeOwned>(tool: &str, args: &ToolArgs) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(args.clone())).map_err(|source| {
        ResearchError::InvalidArguments {
            tool: tool.to_string(),
            source,
        }
    })
}
