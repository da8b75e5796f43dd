//! Offline Research Strategy
//!
//! Deterministic stand-in for a model-driven planner: keyword heuristics pick
//! the tools, search sentinels decide whether to retry, and `synth` writes
//! the answer.

use serde_json::json;

use agent_core::{CallIds, FinalAnswer, Plan, ResearchStrategy, ToolArgs, ToolCall, ToolResult};

use crate::policy::{extract_terms, should_define, should_search, wants_summary};
use crate::svckit::{DEFINE_TOOL, NO_RESULTS_SENTINEL, SEARCH_TOOL, SUMMARIZE_TOOL};
use crate::synth::synthesize_answer;

/// Appended to the question by a follow-up search
pub const BROADENING_SUFFIX: &str = "overview examples tradeoffs";

const SEARCH_K: u64 = 3;
const MAX_DEFINITIONS: usize = 2;
const SUMMARY_SENTENCES: u64 = 2;

fn args(value: serde_json::Value) -> ToolArgs {
    match value {
        serde_json::Value::Object(map) => map,
        _ => ToolArgs::new(),
    }
}

fn search_call(ids: &mut CallIds, query: &str) -> ToolCall {
    ToolCall::new(
        ids.next_id(),
        SEARCH_TOOL,
        args(json!({"query": query, "k": SEARCH_K})),
    )
}

/// Whether at least one search returned something other than the sentinel
pub fn has_evidence(results: &[ToolResult]) -> bool {
    let mut searches = results.iter().filter(|r| r.name == SEARCH_TOOL).peekable();
    searches.peek().is_some() && !searches.all(|r| r.output.contains(NO_RESULTS_SENTINEL))
}

/// Plan steps for the requested tool mix
pub fn plan_steps(define: bool, search: bool, summary: bool) -> Vec<String> {
    let mut steps = vec![
        "Parse the question and identify key concepts.",
        "Decide whether evidence is needed and which tools to use.",
        "Call tools and collect evidence with provenance.",
        "Reflect: if evidence is insufficient, run a targeted follow-up search.",
        "Synthesize a final answer with citations and a tool usage log.",
    ];
    if define {
        steps.insert(2, "Look up definitions for relevant terms.");
    }
    if search {
        steps.insert(3, "Search the offline knowledge base for evidence.");
    }
    if summary {
        steps.insert(4, "Summarize long evidence snippets to keep the answer readable.");
    }
    steps.into_iter().map(str::to_string).collect()
}

/// Keyword-driven strategy over the bundled tools
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineResearchStrategy;

impl ResearchStrategy for OfflineResearchStrategy {
    fn plan(&self, question: &str, ids: &mut CallIds) -> Plan {
        let define = should_define(question);
        let search = should_search(question);
        let summary = wants_summary(question);

        let mut calls = Vec::new();
        if define {
            for term in extract_terms(question).into_iter().take(MAX_DEFINITIONS) {
                calls.push(ToolCall::new(
                    ids.next_id(),
                    DEFINE_TOOL,
                    args(json!({"term": term})),
                ));
            }
        }
        if search {
            calls.push(search_call(ids, question));
        }
        if summary {
            calls.push(ToolCall::new(
                ids.next_id(),
                SUMMARIZE_TOOL,
                args(json!({
                    "text": format!("User asked: {question}"),
                    "max_sentences": SUMMARY_SENTENCES,
                })),
            ));
        }

        Plan {
            steps: plan_steps(define, search, summary),
            calls,
        }
    }

    fn needs_more_evidence(&self, question: &str, results: &[ToolResult]) -> bool {
        should_search(question) && !has_evidence(results)
    }

    fn follow_up(&self, question: &str, ids: &mut CallIds) -> ToolCall {
        search_call(ids, &format!("{question} {BROADENING_SUFFIX}"))
    }

    fn synthesize(&self, question: &str, results: &[ToolResult]) -> FinalAnswer {
        synthesize_answer(question, results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_result(output: &str) -> ToolResult {
        ToolResult {
            id: "call_0001".into(),
            name: SEARCH_TOOL.into(),
            args: ToolArgs::new(),
            output: output.into(),
            started_at_ms: 0,
            finished_at_ms: 0,
        }
    }

    #[test]
    fn test_plan_without_triggers_is_empty() {
        let plan = OfflineResearchStrategy.plan("hello there", &mut CallIds::default());
        assert!(plan.calls.is_empty());
        assert_eq!(plan.steps.len(), 5);
    }

    #[test]
    fn test_plan_caps_definitions_and_orders_calls() {
        let question = r#"Define langgraph, rag and "agent loop" and explain, in short"#;
        let plan = OfflineResearchStrategy.plan(question, &mut CallIds::default());

        let names: Vec<_> = plan.calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![DEFINE_TOOL, DEFINE_TOOL, SEARCH_TOOL, SUMMARIZE_TOOL]
        );
        assert_eq!(plan.calls[0].args["term"], "langgraph");
        assert_eq!(plan.calls[1].args["term"], "rag");
        assert_eq!(plan.calls[2].args["k"], 3);
        assert_eq!(plan.calls[3].args["text"], format!("User asked: {question}"));
        assert_eq!(plan.calls[3].id, "call_0004");
        assert_eq!(plan.steps.len(), 8);
        assert_eq!(plan.steps[2], "Look up definitions for relevant terms.");
        assert_eq!(plan.steps[3], "Search the offline knowledge base for evidence.");
    }

    #[test]
    fn test_evidence_detection() {
        assert!(!has_evidence(&[]));
        assert!(!has_evidence(&[search_result("No offline KB results for query='x'.")]));
        assert!(has_evidence(&[
            search_result("No offline KB results for query='x'."),
            search_result("1. Doc (doc_id=d) — Body."),
        ]));
    }

    #[test]
    fn test_follow_up_broadens_query() {
        let mut ids = CallIds::default();
        ids.next_id();
        let call = OfflineResearchStrategy.follow_up("compare a and b", &mut ids);

        assert_eq!(call.id, "call_0002");
        assert_eq!(call.name, SEARCH_TOOL);
        assert_eq!(call.args["query"], "compare a and b overview examples tradeoffs");
    }
}
