//! research-cli
//!
//! Interactive read-loop over the offline research assistant. Each question
//! gets a fresh run; a failed run is reported and the prompt comes back.

mod cli;
mod render;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{Agent, ToolRegistry};
use research_assistant::{KnowledgeBase, OfflineKnowledgeBase, build_agent, build_registry};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr so answers stay clean on stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let kb = load_knowledge_base(&cli).await?;
    let tools = Arc::new(build_registry(kb).context("failed to register tools")?);
    tracing::info!(tools = ?tools.names(), "Registered tools");

    if cli.list_tools {
        print_schemas(&tools)?;
        return Ok(());
    }

    let agent = build_agent(tools, cli.max_iterations)?;
    read_loop(&agent, &cli).await
}

async fn load_knowledge_base(cli: &Cli) -> anyhow::Result<Arc<dyn KnowledgeBase>> {
    let Some(path) = &cli.kb else {
        return Ok(Arc::new(OfflineKnowledgeBase::new()));
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read knowledge base {}", path.display()))?;
    let kb = OfflineKnowledgeBase::from_json(&json)
        .with_context(|| format!("failed to load knowledge base {}", path.display()))?;
    tracing::info!(documents = kb.len(), path = %path.display(), "Loaded knowledge base");
    Ok(Arc::new(kb))
}

fn print_schemas(tools: &ToolRegistry) -> anyhow::Result<()> {
    let schemas: Vec<_> = tools.list_schemas().collect();
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}

async fn read_loop(agent: &Agent, cli: &Cli) -> anyhow::Result<()> {
    println!("Offline Tool-Using Research Assistant. Type 'exit' to quit.\n");

    let mut stdin = BufReader::new(tokio::io::stdin());
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = next_line(&mut stdin).await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match agent.ask(question).await {
            Ok(state) if cli.json => println!("{}", serde_json::to_string_pretty(&state)?),
            Ok(state) => println!("{}", render::run(&state, cli.full_log)),
            Err(err) => {
                tracing::error!(error = %err, "Research run failed");
                eprintln!("Error: {}", err.user_message());
            }
        }
    }

    Ok(())
}

/// Next input line, `None` at end of input. Bytes that are not valid UTF-8
/// are replaced rather than failing the loop.
async fn next_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
