//! Knowledge Base
//!
//! Document stores consulted by the `search_web` tool.

mod offline;

pub use offline::OfflineKnowledgeBase;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z0-9]+").expect("valid token pattern"));

/// Filler words that never count as overlap
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "do", "does", "for", "from", "how", "in",
    "into", "is", "it", "of", "on", "or", "the", "this", "to", "what", "when", "where", "which",
    "why", "with",
];

/// A single searchable document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document {
    pub fn new(id: &str, title: &str, text: &str, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn tokens(&self) -> HashSet<String> {
        tokenize(&format!("{} {} {}", self.title, self.text, self.tags.join(" ")))
    }
}

/// Lowercase alphanumeric runs, minus stop words
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Document store trait (Strategy pattern)
///
/// Implement this for any corpus: the bundled offline set, a JSON file, an
/// index service.
pub trait KnowledgeBase: Send + Sync {
    /// All documents, in their original order
    fn documents(&self) -> &[Document];

    /// Up to `k` documents ranked by token overlap with `query`.
    ///
    /// Zero-overlap documents are dropped; ties keep document order.
    fn search(&self, query: &str, k: usize) -> Vec<&Document> {
        let query_tokens = tokenize(query);

        let mut scored: Vec<(usize, &Document)> = self
            .documents()
            .iter()
            .map(|doc| (doc.tokens().intersection(&query_tokens).count(), doc))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(k).map(|(_, doc)| doc).collect()
    }

    /// Store name for logs
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_punctuation_and_stop_words() {
        let tokens = tokenize("What is RAG? Compare it, and LangGraph-2!");
        let mut sorted: Vec<_> = tokens.into_iter().collect();
        sorted.sort();
        assert_eq!(sorted, vec!["2", "compare", "langgraph", "rag"]);
    }

    #[test]
    fn test_search_ranks_and_keeps_ties_stable() {
        let kb = OfflineKnowledgeBase::from_documents(vec![
            Document::new("a", "Alpha", "apples", &["fruit"]),
            Document::new("b", "Beta", "apples bananas", &["fruit"]),
            Document::new("c", "Gamma", "apples", &["fruit"]),
            Document::new("d", "Delta", "rocks", &["mineral"]),
        ])
        .unwrap();

        let ids: Vec<_> = kb
            .search("apples bananas", 3)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let capped: Vec<_> = kb.search("fruit", 2).iter().map(|d| d.id.as_str()).collect();
        assert_eq!(capped, vec!["a", "b"]);

        assert!(kb.search("zzzzz", 3).is_empty());
    }
}
