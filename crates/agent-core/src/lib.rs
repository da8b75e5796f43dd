//! # agent-core
//!
//! Core research loop with a pluggable decision strategy and an extensible
//! tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Research   │  │    Tools    │  │  ResearchStrategy   │  │
//! │  │    Loop     │──│   Registry  │──│    (Strategy)       │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `ResearchStrategy` trait decides what to plan, when evidence is
//! sufficient, and how to write the answer, so a deterministic offline
//! policy and a model-backed one are interchangeable.

pub mod error;
pub mod reasoning;
pub mod state;
pub mod tool;
pub mod trace;

pub use error::{AgentError, Result};
pub use reasoning::{Agent, AgentBuilder, AgentConfig, Phase, Plan, ResearchStrategy};
pub use state::{AgentState, CallIds, Citation, Confidence, FinalAnswer};
pub use tool::{Tool, ToolArgs, ToolCall, ToolRegistry, ToolResult, ToolSchema};
