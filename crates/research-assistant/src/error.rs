//! Error Types for the Research Assistant

use thiserror::Error;

use agent_core::AgentError;

pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),
}

impl From<ResearchError> for AgentError {
    fn from(err: ResearchError) -> Self {
        match err {
            ResearchError::InvalidArguments { .. } => Self::ToolValidation(err.to_string()),
            ResearchError::KnowledgeBase(_) => Self::Other(err.to_string()),
        }
    }
}
