//! Execution Trace
//!
//! Wraps a single tool invocation with wall-clock bounds for the audit log.

use chrono::Utc;

use crate::error::Result;
use crate::tool::{Tool, ToolArgs};

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Output of a timed invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedOutput {
    pub started_at_ms: i64,
    pub finished_at_ms: i64,
    pub output: String,
}

/// Invoke `tool` once and record when it started and finished.
///
/// No retry, no timeout. A failure from the tool is returned unchanged;
/// the caller attaches call identity.
pub async fn timed_call(tool: &dyn Tool, args: &ToolArgs) -> Result<TimedOutput> {
    let started_at_ms = now_ms();
    let output = tool.execute(args).await?;
    let finished_at_ms = now_ms();

    Ok(TimedOutput {
        started_at_ms,
        finished_at_ms,
        output,
    })
}
