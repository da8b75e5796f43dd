//! Summarize Tool
//!
//! Rule-based extractive summary: the first few sentences.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use agent_core::{Result as CoreResult, Tool, ToolArgs, ToolSchema, tool::ParameterSchema};

use super::{SUMMARIZE_TOOL, parse_args};

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+").expect("valid sentence pattern"));

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummarizeArgs {
    pub text: String,
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
}

const fn default_max_sentences() -> usize {
    2
}

/// Keep the first `max_sentences` sentences, whitespace collapsed, ending in a period
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = SENTENCE_BREAK
        .split(&cleaned)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(max_sentences)
        .collect::<Vec<_>>()
        .join(". ");

    if !out.is_empty() && !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Tool wrapper around `summarize`
pub struct SummarizeTool;

#[async_trait]
impl Tool for SummarizeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SUMMARIZE_TOOL.into(),
            description: "Rule-based summarization that keeps the leading sentences.".into(),
            parameters: vec![
                ParameterSchema::string("text", "Text to summarize"),
                ParameterSchema::integer("max_sentences", "Sentences to keep", (1, 5), 2),
            ],
            category: Some("text".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, args: &ToolArgs) -> CoreResult<String> {
        let args: SummarizeArgs = parse_args(SUMMARIZE_TOOL, args)?;
        Ok(summarize(&args.text, args.max_sentences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_keeps_leading_sentences() {
        let text = "First   point.  Second\npoint. Third point.";
        assert_eq!(summarize(text, 2), "First point. Second point.");
        assert_eq!(summarize(text, 5), "First point. Second point. Third point.");
    }

    #[test]
    fn test_summarize_adds_period_and_handles_empty() {
        assert_eq!(summarize("no terminal stop", 2), "no terminal stop.");
        assert_eq!(summarize("   ", 2), "");
    }

    #[test]
    fn test_summarize_numbered_search_output() {
        let text = "1. RAG definition (doc_id=kb:rag:definition) — Retrieval first. More text.";
        assert_eq!(
            summarize(text, 2),
            "1. RAG definition (doc_id=kb:rag:definition) — Retrieval first."
        );
    }
}
