//! Text rendering of a finished run

use agent_core::{AgentState, ToolResult};

/// Tool outputs longer than this are cut unless the full log is requested
pub const OUTPUT_PREVIEW_CHARS: usize = 500;

/// Numbered plan, 1-indexed
pub fn plan(steps: &[String]) -> String {
    let lines: String = steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}\n", i + 1))
        .collect();
    format!("\n=== PLAN ===\n{lines}============\n")
}

fn preview(output: &str, full: bool) -> String {
    if full || output.chars().count() <= OUTPUT_PREVIEW_CHARS {
        return output.to_string();
    }
    let mut cut: String = output.chars().take(OUTPUT_PREVIEW_CHARS).collect();
    cut.push('…');
    cut
}

/// Name, id, args, output and duration of every call
pub fn tool_log(log: &[ToolResult], full: bool) -> String {
    let entries: String = log.iter().map(|r| log_entry(r, full)).collect();
    format!("\n=== TOOL USAGE LOG ===\n{entries}======================\n")
}

fn log_entry(r: &ToolResult, full: bool) -> String {
    let args = serde_json::to_string(&r.args).unwrap_or_else(|_| "{}".into());
    format!(
        "- {}  id={}\n  args: {args}\n  output: {}\n  duration_ms: {}\n",
        r.name,
        r.id,
        preview(&r.output, full),
        r.duration_ms()
    )
}

/// Plan, answer and tool log, as printed after each question
pub fn run(state: &AgentState, full: bool) -> String {
    let answer = state
        .final_answer
        .as_ref()
        .map_or("", |answer| answer.answer.as_str());
    format!(
        "{}\n{}\n{}",
        plan(&state.plan),
        answer,
        tool_log(&state.tool_log, full)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ToolArgs;
    use serde_json::json;

    fn result(output: &str) -> ToolResult {
        ToolResult {
            id: "call_0001".into(),
            name: "search_web".into(),
            args: json!({"query": "What is RAG?", "k": 3})
                .as_object()
                .cloned()
                .unwrap_or_else(ToolArgs::new),
            output: output.into(),
            started_at_ms: 1_000,
            finished_at_ms: 1_007,
        }
    }

    #[test]
    fn test_plan_is_one_indexed() {
        let out = plan(&["first".into(), "second".into()]);
        assert!(out.contains("1. first\n2. second\n"));
    }

    #[test]
    fn test_tool_log_entry() {
        let out = tool_log(&[result("hit")], false);
        assert!(out.contains("- search_web  id=call_0001\n"));
        assert!(out.contains(r#"  args: {"query":"What is RAG?","k":3}"#));
        assert!(out.contains("  output: hit\n"));
        assert!(out.contains("  duration_ms: 7\n"));
    }

    #[test]
    fn test_long_output_truncated_unless_full() {
        let long = "é".repeat(OUTPUT_PREVIEW_CHARS + 20);

        let short = tool_log(&[result(&long)], false);
        let expected = format!("{}…", "é".repeat(OUTPUT_PREVIEW_CHARS));
        assert!(short.contains(&expected));

        let full = tool_log(&[result(&long)], true);
        assert!(full.contains(&long));
        assert!(!full.contains('…'));
    }
}
