//! # research-assistant
//!
//! Offline, deterministic research assistant built on `agent-core`.
//!
//! ## Loop
//!
//! ```text
//! question ─► plan ─► search_web / lookup_definition / summarize
//!                          │
//!                          ▼
//!                       reflect ──(no evidence, budget left)──► broadened search
//!                          │
//!                          ▼
//!                 cited answer + confidence
//! ```
//!
//! Nothing leaves the process: search runs over an in-memory knowledge base,
//! definitions come from a fixed dictionary, and summaries are extractive.

pub mod error;
pub mod knowledge;
pub mod policy;
pub mod strategy;
pub mod svckit;
pub mod synth;

use std::sync::Arc;

use agent_core::{Agent, AgentBuilder, ToolRegistry};

pub use error::{ResearchError, Result};
pub use knowledge::{Document, KnowledgeBase, OfflineKnowledgeBase};
pub use strategy::OfflineResearchStrategy;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{DefinitionTool, SearchTool, SummarizeTool};
}

/// Registry with `search_web`, `lookup_definition` and `summarize`
pub fn build_registry(kb: Arc<dyn KnowledgeBase>) -> agent_core::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(tools::SearchTool::new(kb))?;
    registry.register(tools::DefinitionTool)?;
    registry.register(tools::SummarizeTool)?;
    Ok(registry)
}

/// Registry over the bundled knowledge base
pub fn build_default_registry() -> agent_core::Result<ToolRegistry> {
    build_registry(Arc::new(OfflineKnowledgeBase::new()))
}

/// Agent wired with the offline strategy
pub fn build_agent(tools: Arc<ToolRegistry>, max_iterations: usize) -> agent_core::Result<Agent> {
    AgentBuilder::new()
        .tools(tools)
        .strategy(Arc::new(OfflineResearchStrategy))
        .max_iterations(max_iterations)
        .build()
}
