//! Question Heuristics
//!
//! Stateless classifiers over the raw question text. Every trigger test is a
//! case-insensitive substring match; any trigger in a list is enough.

use std::sync::LazyLock;

use regex::Regex;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid quote pattern"));

/// Terms the planner recognizes without quotes
pub const KNOWN_TERMS: &[&str] = &[
    "langgraph",
    "langchain",
    "rag",
    "function calling",
    "citations",
    "tool calling",
    "agent",
];

const SEARCH_TRIGGERS: &[&str] = &[
    "what is",
    "explain",
    "why",
    "how",
    "compare",
    "difference",
    "pros",
    "cons",
    "evidence",
    "sources",
    "research",
    "best",
];

const DEFINE_TRIGGERS: &[&str] = &["define", "definition", "meaning of", "what does", "stand for"];

const SUMMARY_TRIGGERS: &[&str] = &["summarize", "tl;dr", "tldr", "in short"];

fn mentions_any(question: &str, triggers: &[&str]) -> bool {
    let q = question.to_lowercase();
    triggers.iter().any(|t| q.contains(t))
}

/// Known terms first (in list order), then quoted phrases; lowercased and
/// deduplicated by first appearance.
pub fn extract_terms(question: &str) -> Vec<String> {
    let q = question.to_lowercase();

    let known = KNOWN_TERMS
        .iter()
        .filter(|term| q.contains(*term))
        .map(|term| (*term).to_string());
    let quoted = QUOTED
        .captures_iter(question)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let mut terms: Vec<String> = Vec::new();
    for term in known.chain(quoted) {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// The question asks for explanation, comparison or evidence
pub fn should_search(question: &str) -> bool {
    mentions_any(question, SEARCH_TRIGGERS)
}

/// The question asks what something means
pub fn should_define(question: &str) -> bool {
    mentions_any(question, DEFINE_TRIGGERS)
}

/// The question asks for a short form
pub fn wants_summary(question: &str) -> bool {
    mentions_any(question, SUMMARY_TRIGGERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_terms_order_and_dedup() {
        let terms = extract_terms(r#"Define "RAG" and LangGraph, then "Vector Store""#);
        assert_eq!(terms, vec!["langgraph", "rag", "vector store"]);
    }

    #[test]
    fn test_extract_terms_skips_blank_quotes() {
        assert_eq!(extract_terms(r#"what about "  " here"#), Vec::<String>::new());
    }

    #[test]
    fn test_triggers() {
        assert!(should_search("What is RAG?"));
        assert!(!should_define("What is RAG?"));
        assert!(should_define("Define langgraph"));
        assert!(!should_search("Define langgraph"));
        assert!(should_search("COMPARE x and y"));
        assert!(wants_summary("tl;dr please"));
        assert!(!wants_summary("hello there"));
        assert!(!should_search("hello there"));
    }
}
