//! Search Tool
//!
//! Ranks knowledge-base documents against a query.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{Result as CoreResult, Tool, ToolArgs, ToolSchema, tool::ParameterSchema};

use super::{SEARCH_TOOL, parse_args};
use crate::knowledge::KnowledgeBase;

/// Leading phrase of the output when nothing matched
pub const NO_RESULTS_SENTINEL: &str = "No offline KB results";

const DEFAULT_K: usize = 3;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "default_k")]
    pub k: usize,
}

const fn default_k() -> usize {
    DEFAULT_K
}

/// Tool for searching the offline knowledge base
pub struct SearchTool {
    kb: Arc<dyn KnowledgeBase>,
}

impl SearchTool {
    pub fn new(kb: Arc<dyn KnowledgeBase>) -> Self {
        Self { kb }
    }

    /// Render hits as numbered lines, or the no-results message
    pub fn search(&self, args: &SearchArgs) -> String {
        let hits = self.kb.search(&args.query, args.k);
        tracing::debug!(kb = self.kb.name(), query = %args.query, hits = hits.len(), "Searched");

        if hits.is_empty() {
            return format!(
                "{NO_RESULTS_SENTINEL} for query='{}'. (The knowledge base is small; add documents to widen coverage.)",
                args.query
            );
        }

        hits.iter()
            .enumerate()
            .map(|(rank, doc)| format!("{}. {} (doc_id={}) — {}", rank + 1, doc.title, doc.id, doc.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SEARCH_TOOL.into(),
            description: "Offline knowledge-base search. Use when you need evidence or factual grounding.".into(),
            parameters: vec![
                ParameterSchema::string("query", "Free-text search query"),
                ParameterSchema::integer("k", "Maximum number of documents to return", (1, 10), 3),
            ],
            category: Some("retrieval".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, args: &ToolArgs) -> CoreResult<String> {
        let args: SearchArgs = parse_args(SEARCH_TOOL, args)?;
        Ok(self.search(&args))
    }
}
