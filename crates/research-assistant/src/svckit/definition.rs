//! Definition Lookup Tool

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{Result as CoreResult, Tool, ToolArgs, ToolSchema, tool::ParameterSchema};

use super::{DEFINE_TOOL, parse_args};

const DEFINITIONS: &[(&str, &str)] = &[
    (
        "langchain",
        "A framework for building LLM apps from composable components such as tools, chains, and agents.",
    ),
    (
        "langgraph",
        "A graph-based orchestration framework for multi-step, stateful agent workflows.",
    ),
    (
        "rag",
        "Retrieval-Augmented Generation: retrieve context first, then generate answers grounded in that evidence.",
    ),
    (
        "function calling",
        "A pattern where a model emits structured tool invocation requests (name + JSON args).",
    ),
    (
        "citations",
        "References to evidence; here, citations point at the tool call IDs that produced supporting output.",
    ),
];

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionArgs {
    pub term: String,
}

/// Look up a term in the built-in dictionary (case-insensitive)
pub fn lookup_definition(term: &str) -> String {
    let key = term.trim().to_lowercase();
    DEFINITIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or_else(
            || format!("No definition found for '{term}'. Add it to the definitions table."),
            |(_, text)| (*text).to_string(),
        )
}

/// Tool for dictionary lookups
pub struct DefinitionTool;

#[async_trait]
impl Tool for DefinitionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: DEFINE_TOOL.into(),
            description: "Look up a definition from a built-in dictionary.".into(),
            parameters: vec![ParameterSchema::string("term", "Term to define")],
            category: Some("reference".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, args: &ToolArgs) -> CoreResult<String> {
        let args: DefinitionArgs = parse_args(DEFINE_TOOL, args)?;
        Ok(lookup_definition(&args.term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            lookup_definition("  LangGraph "),
            "A graph-based orchestration framework for multi-step, stateful agent workflows."
        );
    }

    #[test]
    fn test_unknown_term() {
        assert!(lookup_definition("quux").starts_with("No definition found for 'quux'"));
    }
}
