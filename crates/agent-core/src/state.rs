//! Run State
//!
//! The record owned by the engine for the duration of one research run.
//! Each transition takes the state by value and hands back the updated one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reasoning::Phase;
use crate::tool::{ToolCall, ToolResult};

/// Default bound on the evidence retry loop
pub const DEFAULT_MAX_ITERATIONS: usize = 2;

/// Mints call IDs for one run: `call_0001`, `call_0002`, ...
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallIds {
    next: u32,
}

impl Default for CallIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl CallIds {
    pub fn next_id(&mut self) -> String {
        let id = format!("call_{:04}", self.next);
        self.next += 1;
        id
    }
}

/// Pointer from answer content to the tool result that justified it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub tool: String,
    pub call_id: String,
}

impl Citation {
    pub fn for_result(result: &ToolResult) -> Self {
        Self {
            tool: result.name.clone(),
            call_id: result.id.clone(),
        }
    }
}

impl std::fmt::Display for Citation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[source: {}#{}]", self.tool, self.call_id)
    }
}

/// How well the collected evidence supports the answer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Terminal output of a run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalAnswer {
    /// Formatted answer text, including the trailing citation block
    pub answer: String,

    /// One entry per tool result that contributed content
    #[serde(default)]
    pub citations: Vec<Citation>,

    pub confidence: Confidence,

    /// Standing advisory strings
    #[serde(default)]
    pub limitations: Vec<String>,
}

/// Mutable record threaded through the research loop
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentState {
    /// Tags log lines for this run
    pub run_id: Uuid,

    // Input
    pub user_question: String,

    // Planning + tool usage
    /// Rewritten wholesale on every planning pass
    pub plan: Vec<String>,
    /// Pending calls; always empty once an acting pass completes
    pub tool_calls: Vec<ToolCall>,
    /// Append-only within a run
    pub tool_results: Vec<ToolResult>,

    // Control loop
    /// Incremented once per planning pass
    pub iteration: usize,
    pub max_iterations: usize,
    /// Incremented once per follow-up search pass
    pub evidence_passes: usize,
    pub needs_more_evidence: bool,

    // Output
    #[serde(rename = "final")]
    pub final_answer: Option<FinalAnswer>,

    /// Append-only audit mirror of `tool_results`
    pub tool_log: Vec<ToolResult>,

    /// Phases entered, in order
    pub phases: Vec<Phase>,

    #[serde(default)]
    pub call_ids: CallIds,
}

impl AgentState {
    pub fn new(user_question: impl Into<String>, max_iterations: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            user_question: user_question.into(),
            plan: Vec::new(),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            iteration: 0,
            max_iterations,
            evidence_passes: 0,
            needs_more_evidence: false,
            final_answer: None,
            tool_log: Vec::new(),
            phases: Vec::new(),
            call_ids: CallIds::default(),
        }
    }

    /// Append a result to both the working set and the audit log
    pub fn record(&mut self, result: ToolResult) {
        self.tool_log.push(result.clone());
        self.tool_results.push(result);
    }

    /// Whether the terminal phase has been reached
    pub const fn is_finished(&self) -> bool {
        self.final_answer.is_some()
    }

    /// Number of times the follow-up search branch was taken
    pub fn more_evidence_count(&self) -> usize {
        self.phases
            .iter()
            .filter(|phase| **phase == Phase::MoreEvidence)
            .count()
    }
}
