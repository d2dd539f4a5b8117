//! Agent module for subject routing
//!
//! Each agent answers one kind of question. The tutor agent classifies a
//! query and delegates it to the math agent, the physics agent, or the
//! completion API.

pub mod math;
pub mod physics;
pub mod tutor;

pub use math::MathAgent;
pub use physics::PhysicsAgent;
pub use tutor::{Subject, TutorAgent};

use crate::number::Number;
use async_trait::async_trait;
use serde::{Serialize, Serializer};
use std::fmt;

/// Core trait for agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Unique identifier for this agent
    fn agent_id(&self) -> &str;

    /// Human-readable name for this agent
    fn name(&self) -> &str;

    /// Role or subject of this agent (e.g., "math", "physics", "tutor")
    fn role(&self) -> &str;

    /// Answer a single question. Never fails: every problem becomes answer text.
    async fn handle(&self, query: &str) -> Answer;

    /// Get the list of available tools for this agent
    fn get_available_tools(&self) -> Vec<String>;
}

/// The answer to one query
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// A numeric value returned as-is, such as a looked up constant
    Value(Number),
    /// Everything else: computed results, completions, and error text
    Text(String),
}

impl Answer {
    pub fn text(text: impl Into<String>) -> Self {
        Answer::Text(text.into())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Value(number) => write!(f, "{}", number),
            Answer::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Answer::Value(number) => number.serialize(serializer),
            Answer::Text(text) => serializer.serialize_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_rendering() {
        assert_eq!(Answer::Value(Number::Float(6.62607015e-34)).to_string(), "6.62607015e-34");
        assert_eq!(Answer::text("The result is: 42").to_string(), "The result is: 42");
    }

    #[test]
    fn test_answer_serialization() {
        let value = serde_json::to_value(Answer::Value(Number::from(299792458))).unwrap();
        assert_eq!(value, serde_json::json!(299792458));

        let value = serde_json::to_value(Answer::text("Constant not found.")).unwrap();
        assert_eq!(value, serde_json::json!("Constant not found."));
    }
}
