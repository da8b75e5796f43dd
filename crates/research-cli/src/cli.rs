//! Command-line flags

use std::path::PathBuf;

use clap::{Parser, builder::BoolishValueParser};

use agent_core::state::DEFAULT_MAX_ITERATIONS;

#[derive(Debug, Parser)]
#[command(
    name = "research-cli",
    version,
    about = "Offline tool-using research assistant"
)]
pub struct Cli {
    /// Bound on planning plus follow-up search passes per question
    #[arg(long, env = "RESEARCH_MAX_ITERATIONS", default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Print tool outputs in full instead of truncating them
    #[arg(long, env = "RESEARCH_FULL_LOG", value_parser = BoolishValueParser::new())]
    pub full_log: bool,

    /// Print each finished run as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the registered tool schemas and exit
    #[arg(long)]
    pub list_tools: bool,

    /// JSON file with a document array to search instead of the bundled set
    #[arg(long, env = "RESEARCH_KB")]
    pub kb: Option<PathBuf>,
}
