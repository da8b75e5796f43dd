//! Answer Synthesis
//!
//! Deterministic assembly of the final answer from collected tool results.
//! Same question and results always produce the same bytes.

use agent_core::{Citation, Confidence, FinalAnswer, ToolResult};

use crate::svckit::{DEFINE_TOOL, NO_RESULTS_SENTINEL, SEARCH_TOOL, SUMMARIZE_TOOL, summarize};

/// Standing caveats attached to every answer
pub const LIMITATIONS: [&str; 3] = [
    "No real web access: `search_web` queries a small offline KB.",
    "Planning/reflection are deterministic heuristics (no hosted LLM).",
    "Coverage depends on KB content; load more documents with `--kb` for broader knowledge.",
];

const LANGGRAPH_ANSWER: &str = "LangGraph is most useful when you want **explicit, stateful control** over \
multi-step workflows: branching, loops (tool-use cycles), and clear execution structure. For a research \
assistant, that maps cleanly onto a graph: **plan → tool calls → reflect → retry → synthesize**, with state \
and audit logs.";

const RAG_ANSWER: &str = "RAG (Retrieval-Augmented Generation) improves reliability by grounding generation \
in retrieved context. Even in this offline version, the same principle applies: retrieve evidence first, then \
generate, and cite the evidence-producing tool calls.";

const COMPARE_ANSWER: &str = "This assistant answers comparison questions by first retrieving evidence \
(offline KB search), then synthesizing trade-offs into a readable summary. When evidence is insufficient, it \
performs a targeted follow-up search pass.";

const GENERIC_ANSWER: &str = "This assistant decides when to retrieve evidence from tools, gathers it, and \
produces a citation-backed answer. The tool usage log makes the workflow auditable and easy to debug.";

/// Answer paragraph chosen by keyword precedence; first match wins
pub fn answer_template(question: &str) -> &'static str {
    let q = question.to_lowercase();
    if q.contains("langgraph") {
        LANGGRAPH_ANSWER
    } else if q.contains("rag") {
        RAG_ANSWER
    } else if q.contains("compare") || q.contains("difference") {
        COMPARE_ANSWER
    } else {
        GENERIC_ANSWER
    }
}

/// `[no sources used]`, or space-joined `[source: tool#id]` tokens
pub fn format_citation_block(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return "[no sources used]".into();
    }
    citations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Low if any search came back empty, high if searches found something,
/// medium when no search ran
pub fn confidence_for(searches: &[&ToolResult]) -> Confidence {
    if searches.is_empty() {
        Confidence::Medium
    } else if searches.iter().any(|r| r.output.contains(NO_RESULTS_SENTINEL)) {
        Confidence::Low
    } else {
        Confidence::High
    }
}

fn by_tool<'a>(results: &'a [ToolResult], tool: &str) -> Vec<&'a ToolResult> {
    results.iter().filter(|r| r.name == tool).collect()
}

/// Build the answer document, citations and confidence
pub fn synthesize_answer(question: &str, results: &[ToolResult]) -> FinalAnswer {
    let definitions = by_tool(results, DEFINE_TOOL);
    let searches = by_tool(results, SEARCH_TOOL);
    let summaries = by_tool(results, SUMMARIZE_TOOL);

    let mut used: Vec<&ToolResult> = Vec::new();
    let mut parts: Vec<String> = Vec::new();

    if !definitions.is_empty() {
        parts.push("## Definitions".into());
        for &r in &definitions {
            let term = r.args.get("term").and_then(|v| v.as_str()).unwrap_or("term");
            parts.push(format!("- **{term}**: {} {}", r.output, Citation::for_result(r)));
            used.push(r);
        }
    }

    if !searches.is_empty() {
        parts.push("\n## Evidence (offline search)".into());
        for &r in &searches {
            let brief = summarize(&r.output, 2);
            parts.push(format!("- {brief} {}", Citation::for_result(r)));
            used.push(r);
        }
    }

    if !summaries.is_empty() {
        parts.push("\n## Additional Summary".into());
        for &r in &summaries {
            parts.push(format!("- {} {}", r.output, Citation::for_result(r)));
            used.push(r);
        }
    }

    parts.push("\n## Answer".into());
    parts.push(answer_template(question).into());

    let citations: Vec<Citation> = used.into_iter().map(Citation::for_result).collect();
    let answer = format!(
        "{}\n\nCitations: {}",
        parts.join("\n"),
        format_citation_block(&citations)
    );

    FinalAnswer {
        answer,
        citations,
        confidence: confidence_for(&searches),
        limitations: LIMITATIONS.iter().map(|s| (*s).to_string()).collect(),
    }
}
