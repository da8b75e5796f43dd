//! Offline Knowledge Base
//!
//! A small in-memory corpus. Swap in a JSON file with `from_json` for
//! broader coverage.

use std::collections::HashSet;

use super::{Document, KnowledgeBase};
use crate::error::{ResearchError, Result};

/// In-memory document store
pub struct OfflineKnowledgeBase {
    documents: Vec<Document>,
}

impl Default for OfflineKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineKnowledgeBase {
    /// The bundled corpus
    pub fn new() -> Self {
        Self {
            documents: bundled_documents(),
        }
    }

    /// Build from caller-supplied documents; IDs must be unique
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        let mut seen = HashSet::new();
        for doc in &documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(ResearchError::KnowledgeBase(format!(
                    "duplicate document id: {}",
                    doc.id
                )));
            }
        }
        Ok(Self { documents })
    }

    /// Parse a JSON array of documents
    pub fn from_json(json: &str) -> Result<Self> {
        let documents: Vec<Document> = serde_json::from_str(json)
            .map_err(|e| ResearchError::KnowledgeBase(format!("invalid document list: {e}")))?;
        Self::from_documents(documents)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl KnowledgeBase for OfflineKnowledgeBase {
    fn documents(&self) -> &[Document] {
        &self.documents
    }

    fn name(&self) -> &str {
        "OfflineKnowledgeBase"
    }
}

fn bundled_documents() -> Vec<Document> {
    vec![
        Document::new(
            "kb:langgraph:overview",
            "LangGraph overview",
            "LangGraph models multi-step LLM applications as graphs with nodes and edges, \
             supporting loops, branching, and stateful execution.",
            &["langgraph", "graphs", "state", "orchestration"],
        ),
        Document::new(
            "kb:function-calling:pattern",
            "Function calling pattern",
            "Function calling is when a model emits a structured request to call a tool \
             (function name + JSON args). The system executes the tool and returns results \
             to ground the final answer.",
            &["function calling", "tools", "agents", "structured outputs"],
        ),
        Document::new(
            "kb:rag:definition",
            "RAG definition",
            "Retrieval-Augmented Generation (RAG) retrieves relevant context before generating, \
             improving factual grounding and enabling citations to evidence.",
            &["rag", "retrieval", "citations", "grounding"],
        ),
        Document::new(
            "kb:citations:practice",
            "Citations for tool-using assistants",
            "A practical citation approach is to reference the specific tool calls that produced \
             supporting evidence, enabling auditability and debugging.",
            &["citations", "provenance", "audit"],
        ),
        Document::new(
            "kb:agent-loop:reflect",
            "Agent loop with reflection",
            "A common agent structure is plan → act → observe → reflect. Reflection checks if \
             evidence is sufficient; if not, the agent gathers more information or asks \
             clarifying questions.",
            &["agent", "loop", "reflection", "planning"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_corpus() {
        let kb = OfflineKnowledgeBase::new();
        assert_eq!(kb.len(), 5);

        let hits = kb.search("What is RAG?", 3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "kb:rag:definition");
    }

    #[test]
    fn test_bundled_text_is_single_line() {
        let kb = OfflineKnowledgeBase::new();
        let doc = &kb.documents()[0];
        assert_eq!(
            doc.text,
            "LangGraph models multi-step LLM applications as graphs with nodes and edges, \
             supporting loops, branching, and stateful execution."
        );
        assert!(kb.documents().iter().all(|d| !d.text.contains('\n')));
        assert!(kb.documents()[4].text.starts_with("A common agent structure is plan → act → observe → reflect."));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "x", "title": "One", "text": "first"},
            {"id": "x", "title": "Two", "text": "second"}
        ]"#;
        assert!(matches!(
            OfflineKnowledgeBase::from_json(json),
            Err(ResearchError::KnowledgeBase(_))
        ));

        let kb = OfflineKnowledgeBase::from_json(r#"[{"id": "x", "title": "One", "text": "first"}]"#)
            .unwrap();
        assert_eq!(kb.documents()[0].tags.len(), 0);
    }
}
