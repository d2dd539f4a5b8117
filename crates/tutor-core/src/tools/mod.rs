//! Tools module for AI assistants
//!
//! The deterministic tools the tutor can answer with before falling back to
//! the completion API. Each tool is also describable as a genai tool so it
//! can be offered to a model.

pub mod calc;
pub mod physics_constants;

use anyhow::Error;
use async_trait::async_trait;
use serde_json::Value;

/// A tool that can be used by an AI assistant
#[async_trait]
pub trait AiTool: Send + Sync {
    /// The name of the tool
    fn name(&self) -> &str;

    /// A description of what the tool does
    fn description(&self) -> &str;

    /// The JSON schema for the tool's parameters
    fn schema(&self) -> Value;

    /// Execute the tool with the given parameters
    async fn execute(&self, params: Value) -> Result<Value, Error>;

    /// Validate the parameters against the schema
    fn validate_params(&self, _params: &Value) -> Result<(), Error> {
        Ok(())
    }

    /// Convert to a genai Tool
    fn to_genai_tool(&self) -> genai::chat::Tool {
        genai::chat::Tool::new(self.name())
            .with_description(self.description())
            .with_schema(self.schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::calc::MathTool;
    use crate::tools::physics_constants::PhysicsConstantTool;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl AiTool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes back the input text"
        }

        fn schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }

        async fn execute(&self, params: Value) -> Result<Value, Error> {
            if let Some(text) = params.get("text").and_then(|t| t.as_str()) {
                Ok(json!(text))
            } else {
                Err(anyhow::anyhow!("Missing 'text' parameter"))
            }
        }
    }

    #[tokio::test]
    async fn test_default_validation_accepts_anything() {
        let tool = EchoTool;
        assert!(tool.validate_params(&json!(null)).is_ok());
        let result = tool.execute(json!({"text": "Hello, world!"})).await.unwrap();
        assert_eq!(result.as_str().unwrap(), "Hello, world!");
    }

    #[test]
    fn test_genai_tool_conversion() {
        let tools: Vec<Box<dyn AiTool>> = vec![Box::new(MathTool), Box::new(PhysicsConstantTool)];
        for tool in &tools {
            let genai_tool = tool.to_genai_tool();
            assert!(format!("{:?}", genai_tool.name).contains(tool.name()));
        }
    }
}
