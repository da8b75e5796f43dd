//! Research Loop
//!
//! Explicit state machine driving one run:
//!
//! ```text
//! planning ──(calls?)──► acting ──► reflecting ──(more?)──► more_evidence
//!     │                    ▲            │                        │
//!     │                    └────────────┼────────────────────────┘
//!     └──(none)──► synthesizing ◄───────┘
//!                       │
//!                       ▼
//!                   terminal
//! ```
//!
//! Every transition takes the `AgentState` by value and returns it with the
//! next `Phase`. What to plan, when evidence is sufficient, and how to write
//! the answer are delegated to a `ResearchStrategy`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::state::{AgentState, CallIds, DEFAULT_MAX_ITERATIONS, FinalAnswer};
use crate::tool::{ToolCall, ToolRegistry, ToolResult};
use crate::trace;

/// Phases of the research loop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Planning,
    Acting,
    Reflecting,
    MoreEvidence,
    Synthesizing,
    Terminal,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Planning => "planning",
            Self::Acting => "acting",
            Self::Reflecting => "reflecting",
            Self::MoreEvidence => "more_evidence",
            Self::Synthesizing => "synthesizing",
            Self::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

/// Output of a planning pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
    /// Human-readable steps
    pub steps: Vec<String>,

    /// Tool calls to queue for the acting phase
    pub calls: Vec<ToolCall>,
}

/// Decision points of the loop (Strategy pattern)
///
/// The offline implementation uses keyword heuristics; an LLM-backed planner
/// and synthesizer can be dropped in without touching the loop.
pub trait ResearchStrategy: Send + Sync {
    /// Derive plan steps and pending calls from the question
    fn plan(&self, question: &str, ids: &mut CallIds) -> Plan;

    /// Whether the collected results leave the question without evidence
    fn needs_more_evidence(&self, question: &str, results: &[ToolResult]) -> bool;

    /// The single broadened call issued by a follow-up pass
    fn follow_up(&self, question: &str, ids: &mut CallIds) -> ToolCall;

    /// Deterministic answer assembly
    fn synthesize(&self, question: &str, results: &[ToolResult]) -> FinalAnswer;
}

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Bound on planning plus follow-up passes
    pub max_iterations: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// The research agent
pub struct Agent {
    tools: Arc<ToolRegistry>,
    strategy: Arc<dyn ResearchStrategy>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        tools: Arc<ToolRegistry>,
        strategy: Arc<dyn ResearchStrategy>,
        config: AgentConfig,
    ) -> Self {
        Self {
            tools,
            strategy,
            config,
        }
    }

    /// Fresh state for a question, using the configured bound
    pub fn start(&self, question: impl Into<String>) -> AgentState {
        AgentState::new(question, self.config.max_iterations)
    }

    /// Run a question to completion
    pub async fn ask(&self, question: &str) -> Result<AgentState> {
        self.run(self.start(question)).await
    }

    /// Drive `state` from planning to the terminal phase.
    ///
    /// A tool failure aborts the run; calls queued behind the failing one are
    /// discarded along with the state.
    pub async fn run(&self, mut state: AgentState) -> Result<AgentState> {
        tracing::info!(run_id = %state.run_id, question = %state.user_question, "Starting research run");

        let mut phase = Phase::Planning;
        loop {
            state.phases.push(phase);
            tracing::debug!(run_id = %state.run_id, %phase, "Entering phase");

            if phase == Phase::Terminal {
                break;
            }

            let (next_state, next) = self.step(phase, state).await?;
            debug_assert_eq!(next_state.tool_log.len(), next_state.tool_results.len());
            state = next_state;
            phase = next;
        }

        tracing::info!(
            run_id = %state.run_id,
            iterations = state.iteration,
            evidence_passes = state.evidence_passes,
            tool_calls = state.tool_log.len(),
            "Research run finished"
        );
        Ok(state)
    }

    /// Execute one phase and pick the next
    pub async fn step(&self, phase: Phase, state: AgentState) -> Result<(AgentState, Phase)> {
        match phase {
            Phase::Planning => Ok(self.plan(state)),
            Phase::Acting => self.act(state).await,
            Phase::Reflecting => Ok(self.reflect(state)),
            Phase::MoreEvidence => Ok(self.more_evidence(state)),
            Phase::Synthesizing => Ok(self.synthesize(state)),
            Phase::Terminal => Ok((state, Phase::Terminal)),
        }
    }

    fn plan(&self, mut state: AgentState) -> (AgentState, Phase) {
        state.iteration += 1;

        let plan = self
            .strategy
            .plan(&state.user_question, &mut state.call_ids);
        state.plan = plan.steps;
        state.tool_calls = plan.calls;

        let next = route_after_planning(&state);
        tracing::debug!(
            run_id = %state.run_id,
            iteration = state.iteration,
            queued = state.tool_calls.len(),
            %next,
            "Planned"
        );
        (state, next)
    }

    async fn act(&self, mut state: AgentState) -> Result<(AgentState, Phase)> {
        let calls = std::mem::take(&mut state.tool_calls);

        for call in calls {
            let tool = self.tools.get(&call.name)?;
            tool.validate(&call.args)?;

            let timed = trace::timed_call(tool.as_ref(), &call.args)
                .await
                .map_err(|source| AgentError::execution(&call.name, &call.id, source))?;

            let result = ToolResult {
                id: call.id,
                name: call.name,
                args: call.args,
                output: timed.output,
                started_at_ms: timed.started_at_ms,
                finished_at_ms: timed.finished_at_ms,
            };
            tracing::debug!(
                run_id = %state.run_id,
                tool = %result.name,
                call_id = %result.id,
                duration_ms = result.duration_ms(),
                "Tool call finished"
            );
            state.record(result);
        }

        Ok((state, Phase::Reflecting))
    }

    fn reflect(&self, mut state: AgentState) -> (AgentState, Phase) {
        state.needs_more_evidence = self
            .strategy
            .needs_more_evidence(&state.user_question, &state.tool_results);

        let next = route_after_reflecting(&state);
        tracing::debug!(
            run_id = %state.run_id,
            needs_more_evidence = state.needs_more_evidence,
            %next,
            "Reflected"
        );
        (state, next)
    }

    fn more_evidence(&self, mut state: AgentState) -> (AgentState, Phase) {
        let call = self
            .strategy
            .follow_up(&state.user_question, &mut state.call_ids);
        state.tool_calls = vec![call];
        state.evidence_passes += 1;
        (state, Phase::Acting)
    }

    fn synthesize(&self, mut state: AgentState) -> (AgentState, Phase) {
        let answer = self
            .strategy
            .synthesize(&state.user_question, &state.tool_results);
        state.final_answer = Some(answer);
        (state, Phase::Terminal)
    }
}

/// Act when calls are queued, otherwise answer directly
pub fn route_after_planning(state: &AgentState) -> Phase {
    if state.tool_calls.is_empty() {
        Phase::Synthesizing
    } else {
        Phase::Acting
    }
}

/// Retry only while the pass budget allows it
pub fn route_after_reflecting(state: &AgentState) -> Phase {
    let passes = state.iteration + state.evidence_passes;
    if state.needs_more_evidence && passes < state.max_iterations {
        Phase::MoreEvidence
    } else {
        Phase::Synthesizing
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    tools: Option<Arc<ToolRegistry>>,
    strategy: Option<Arc<dyn ResearchStrategy>>,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            tools: None,
            strategy: None,
            config: AgentConfig::default(),
        }
    }

    pub fn tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn strategy(mut self, strategy: Arc<dyn ResearchStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub const fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let strategy = self
            .strategy
            .ok_or_else(|| AgentError::Config("Research strategy is required".into()))?;
        let tools = self.tools.unwrap_or_default();

        Ok(Agent::new(tools, strategy, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Citation, Confidence};
    use crate::tool::{ParameterSchema, Tool, ToolArgs, ToolSchema};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".into(),
                description: "Echo text".into(),
                parameters: vec![ParameterSchema::string("text", "Text to echo")],
                category: None,
                has_side_effects: false,
            }
        }

        async fn execute(&self, args: &ToolArgs) -> Result<String> {
            Ok(args
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string())
        }
    }

    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "broken".into(),
                description: "Always fails".into(),
                parameters: Vec::new(),
                category: None,
                has_side_effects: false,
            }
        }

        async fn execute(&self, _args: &ToolArgs) -> Result<String> {
            Err(AgentError::Other("disk on fire".into()))
        }
    }

    /// Queues a fixed list of calls and always (or never) asks for more.
    struct ScriptedStrategy {
        calls: Vec<(&'static str, Value)>,
        want_more: bool,
    }

    impl ResearchStrategy for ScriptedStrategy {
        fn plan(&self, _question: &str, ids: &mut CallIds) -> Plan {
            Plan {
                steps: vec!["step one".into(), "step two".into()],
                calls: self
                    .calls
                    .iter()
                    .map(|(name, args)| {
                        ToolCall::new(ids.next_id(), *name, args.as_object().cloned().unwrap())
                    })
                    .collect(),
            }
        }

        fn needs_more_evidence(&self, _question: &str, _results: &[ToolResult]) -> bool {
            self.want_more
        }

        fn follow_up(&self, question: &str, ids: &mut CallIds) -> ToolCall {
            let args = json!({"text": format!("{question} again")});
            ToolCall::new(ids.next_id(), "echo", args.as_object().cloned().unwrap())
        }

        fn synthesize(&self, _question: &str, results: &[ToolResult]) -> FinalAnswer {
            FinalAnswer {
                answer: results
                    .iter()
                    .map(|r| r.output.as_str())
                    .collect::<Vec<_>>()
                    .join("|"),
                citations: results.iter().map(Citation::for_result).collect(),
                confidence: Confidence::Medium,
                limitations: Vec::new(),
            }
        }
    }

    fn agent(calls: Vec<(&'static str, Value)>, want_more: bool, max: usize) -> Agent {
        let mut tools = ToolRegistry::new();
        tools.register(EchoTool).unwrap();
        tools.register(BrokenTool).unwrap();

        AgentBuilder::new()
            .tools(Arc::new(tools))
            .strategy(Arc::new(ScriptedStrategy { calls, want_more }))
            .max_iterations(max)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_no_calls_goes_straight_to_synthesis() {
        let state = agent(Vec::new(), true, 2).ask("hello").await.unwrap();

        assert_eq!(
            state.phases,
            vec![Phase::Planning, Phase::Synthesizing, Phase::Terminal]
        );
        assert_eq!(state.iteration, 1);
        assert!(state.tool_log.is_empty());
        assert!(state.is_finished());
    }

    #[tokio::test]
    async fn test_calls_run_in_queued_order() {
        let calls = vec![
            ("echo", json!({"text": "a"})),
            ("echo", json!({"text": "b"})),
        ];
        let state = agent(calls, false, 2).ask("hello").await.unwrap();

        assert!(state.tool_calls.is_empty());
        assert_eq!(state.tool_results, state.tool_log);
        let ids: Vec<_> = state.tool_results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["call_0001", "call_0002"]);
        assert_eq!(state.final_answer.unwrap().answer, "a|b");
        assert_eq!(state.plan.len(), 2);
    }

    #[tokio::test]
    async fn test_retry_loop_is_bounded() {
        let calls = vec![("echo", json!({"text": "a"}))];
        let state = agent(calls, true, 3).ask("hello").await.unwrap();

        assert_eq!(state.more_evidence_count(), 2);
        assert_eq!(state.evidence_passes, 2);
        assert_eq!(state.iteration, 1);
        assert!(state.iteration <= state.max_iterations + 1);
        assert_eq!(state.tool_log.len(), 3);
        assert_eq!(state.tool_log[2].args["text"], "hello again");
    }

    #[tokio::test]
    async fn test_zero_ceiling_forces_synthesis() {
        let calls = vec![("echo", json!({"text": "a"}))];
        let state = agent(calls, true, 0).ask("hello").await.unwrap();

        assert!(state.needs_more_evidence);
        assert_eq!(state.more_evidence_count(), 0);
        assert_eq!(
            state.phases,
            vec![
                Phase::Planning,
                Phase::Acting,
                Phase::Reflecting,
                Phase::Synthesizing,
                Phase::Terminal
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_aborts_run() {
        let calls = vec![("missing", json!({}))];
        let err = agent(calls, false, 2).ask("hello").await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_tool_failure_aborts_run() {
        let calls = vec![
            ("echo", json!({"text": "a"})),
            ("broken", json!({})),
            ("echo", json!({"text": "never"})),
        ];
        let err = agent(calls, false, 2).ask("hello").await.unwrap_err();

        match err {
            AgentError::ToolExecution { tool, call_id, .. } => {
                assert_eq!(tool, "broken");
                assert_eq!(call_id, "call_0002");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_args_rejected_before_execution() {
        let calls = vec![("echo", json!({"text": "a", "volume": 11}))];
        let err = agent(calls, false, 2).ask("hello").await.unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));
    }

    #[test]
    fn test_builder_requires_strategy() {
        let err = AgentBuilder::new().build().err().unwrap();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn test_routing_after_reflecting() {
        let mut state = AgentState::new("q", 2);
        state.iteration = 1;
        state.needs_more_evidence = true;
        assert_eq!(route_after_reflecting(&state), Phase::MoreEvidence);

        state.evidence_passes = 1;
        assert_eq!(route_after_reflecting(&state), Phase::Synthesizing);

        state.evidence_passes = 0;
        state.needs_more_evidence = false;
        assert_eq!(route_after_reflecting(&state), Phase::Synthesizing);
    }
}
