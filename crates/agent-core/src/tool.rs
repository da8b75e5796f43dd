//! Tool System
//!
//! Extensible tool framework for agent capabilities.
//! Tools are registered once at startup and invoked by the acting phase
//! of the research loop. Arguments are checked against each tool's declared
//! parameters before the capability runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Named arguments of a tool call, in insertion order
pub type ToolArgs = Map<String, Value>;

/// Tool call request produced by the planner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier, unique within a run
    pub id: String,

    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub args: ToolArgs,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, args: ToolArgs) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args,
        }
    }
}

/// Recorded output and timing of an executed tool call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Call ID echoed from the request
    pub id: String,

    /// Tool that was called
    pub name: String,

    /// Arguments echoed from the request
    pub args: ToolArgs,

    /// Text produced by the tool
    pub output: String,

    /// Wall-clock start, milliseconds since the Unix epoch
    pub started_at_ms: i64,

    /// Wall-clock end, milliseconds since the Unix epoch
    pub finished_at_ms: i64,
}

impl ToolResult {
    /// Elapsed time, never negative
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.finished_at_ms - self.started_at_ms).unwrap_or(0)
    }
}

/// Argument types a tool can declare
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
        }
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Inclusive lower bound for integers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,

    /// Inclusive upper bound for integers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

impl ParameterSchema {
    /// Required string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::String,
            description: description.into(),
            required: true,
            default: None,
            minimum: None,
            maximum: None,
        }
    }

    /// Optional bounded integer parameter with a default
    pub fn integer(
        name: impl Into<String>,
        description: impl Into<String>,
        range: (i64, i64),
        default: i64,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::Integer,
            description: description.into(),
            required: false,
            default: Some(json!(default)),
            minimum: Some(range.0),
            maximum: Some(range.1),
        }
    }

    fn check(&self, value: &Value) -> Result<()> {
        if !self.param_type.matches(value) {
            return Err(AgentError::ToolValidation(format!(
                "Parameter '{}' must be of type {}",
                self.name, self.param_type
            )));
        }

        if let Some(n) = value.as_i64() {
            let below = self.minimum.is_some_and(|min| n < min);
            let above = self.maximum.is_some_and(|max| n > max);
            if below || above {
                return Err(AgentError::ToolValidation(format!(
                    "Parameter '{}' out of range: {}",
                    self.name, n
                )));
            }
        }

        Ok(())
    }

    fn json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.param_type));
        if !self.description.is_empty() {
            prop.insert("description".into(), json!(self.description));
        }
        if let Some(min) = self.minimum {
            prop.insert("minimum".into(), json!(min));
        }
        if let Some(max) = self.maximum {
            prop.insert("maximum".into(), json!(max));
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        Value::Object(prop)
    }
}

/// Tool definition schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,

    /// Category for grouping
    #[serde(default)]
    pub category: Option<String>,

    /// Whether tool has side effects
    #[serde(default)]
    pub has_side_effects: bool,
}

impl ToolSchema {
    /// Reject missing required fields, unknown fields, wrong types and
    /// out-of-range integers.
    pub fn validate(&self, args: &ToolArgs) -> Result<()> {
        for param in &self.parameters {
            match args.get(&param.name) {
                Some(value) => param.check(value)?,
                None if param.required => {
                    return Err(AgentError::ToolValidation(format!(
                        "Missing required parameter: {}",
                        param.name
                    )));
                }
                None => {}
            }
        }

        if let Some(unknown) = args
            .keys()
            .find(|key| !self.parameters.iter().any(|p| &p.name == *key))
        {
            return Err(AgentError::ToolValidation(format!(
                "Unknown parameter '{}' for tool {}",
                unknown, self.name
            )));
        }

        Ok(())
    }

    /// JSON-Schema object describing the parameters
    pub fn parameters_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Function-calling descriptor for introspection
    pub fn to_function(&self) -> FunctionDescriptor {
        FunctionDescriptor {
            kind: "function".into(),
            function: FunctionSpec {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters: self.parameters_json(),
            },
        }
    }
}

/// `{type: "function", function: {...}}` descriptor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's declared schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments, returning its text output
    async fn execute(&self, args: &ToolArgs) -> Result<String>;

    /// Validate arguments before execution
    fn validate(&self, args: &ToolArgs) -> Result<()> {
        self.schema().validate(args)
    }
}

struct RegisteredTool {
    schema: ToolSchema,
    tool: Arc<dyn Tool>,
}

/// Registry for available tools
///
/// Built once at startup and shared read-only (usually behind an `Arc`)
/// by every run. Registration order is kept for introspection.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        self.register_boxed(Arc::new(tool))
    }

    /// Register a shared tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let schema = tool.schema();
        if self.index.contains_key(&schema.name) {
            return Err(AgentError::DuplicateTool(schema.name));
        }

        tracing::debug!(tool = %schema.name, "Registered tool");
        self.index.insert(schema.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool { schema, tool });
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.entry(name).map(|entry| Arc::clone(&entry.tool))
    }

    fn entry(&self, name: &str) -> Result<&RegisteredTool> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| AgentError::ToolNotFound(name.to_string()))
    }

    /// Invoke a tool directly, without tracing
    pub async fn call(&self, name: &str, args: &ToolArgs) -> Result<String> {
        let tool = self.get(name)?;
        tool.validate(args)?;
        tool.execute(args).await
    }

    /// Function-calling descriptors, in registration order.
    ///
    /// Lazy; call again to restart.
    pub fn list_schemas(&self) -> impl Iterator<Item = FunctionDescriptor> + '_ {
        self.tools.iter().map(|entry| entry.schema.to_function())
    }

    /// Get tool names
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|entry| entry.schema.name.as_str()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
