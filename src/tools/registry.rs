//! Tool registry for the host framework.

use std::collections::HashMap;

use super::base::Tool;

/// Registry mapping tool names to tool implementations.
///
/// Populated explicitly by the host; dispatches invocations by name.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a reference to a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Check if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all tool definitions in OpenAI format.
    pub fn definitions(&self) -> Vec<serde_json::Value> {
        self.tools.values().map(|tool| tool.to_schema()).collect()
    }

    /// Invoke a tool by name with the given parameters.
    ///
    /// Returns the tool's result string, or an error message if no tool
    /// with that name is registered.
    pub async fn invoke(
        &self,
        name: &str,
        params: HashMap<String, serde_json::Value>,
    ) -> String {
        match self.tools.get(name) {
            Some(tool) => tool.invoke(params).await,
            None => format!("Error: Tool '{}' not found", name),
        }
    }

    /// Get list of registered tool names.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }

        async fn invoke(&self, params: HashMap<String, serde_json::Value>) -> String {
            params
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        assert!(!registry.has("echo"));

        registry.register(Box::new(EchoTool));
        assert!(registry.has("echo"));
        assert_eq!(registry.get("echo").unwrap().name(), "echo");
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.tool_names(), vec!["echo".to_string()]);
    }

    #[test]
    fn test_definitions_in_openai_format() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0]["type"], "function");
        assert_eq!(definitions[0]["function"]["name"], "echo");
    }

    #[tokio::test]
    async fn test_invoke_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let mut params = HashMap::new();
        params.insert(
            "text".to_string(),
            serde_json::Value::String("hello".to_string()),
        );
        let result = registry.invoke("echo", params).await;
        assert_eq!(result, "hello");
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let result = registry.invoke("nope", HashMap::new()).await;
        assert_eq!(result, "Error: Tool 'nope' not found");
    }
}
