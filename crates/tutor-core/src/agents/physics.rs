//! Physics agent: answers constant lookups directly

use crate::agents::{Agent, Answer};
use crate::llm::{self, CompletionClient};
use crate::tools::AiTool;
use crate::tools::physics_constants::{
    CONSTANT_NOT_FOUND, PHYSICS_CONSTANTS, PhysicsConstantTool, get_constant,
};
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;
use tutor_common::prompts;

/// Case-insensitive alternation of the space-separated constant names.
///
/// Narrower than `extract_constant_name`: underscores and hyphens do not match.
static CONSTANT_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    let phrases: Vec<String> = PHYSICS_CONSTANTS
        .iter()
        .map(|(name, _)| regex::escape(&name.replace('_', " ")))
        .collect();
    Regex::new(&format!("(?i)({})", phrases.join("|"))).expect("valid constant pattern")
});

/// Answers physics questions from the constant table, or the completion API
pub struct PhysicsAgent {
    llm: Arc<dyn CompletionClient>,
}

impl PhysicsAgent {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Canonical name of the first constant phrase in `query`
    pub fn extract_constant_phrase(query: &str) -> Option<String> {
        CONSTANT_PHRASE
            .find(query)
            .map(|m| m.as_str().to_lowercase().replace(' ', "_"))
    }
}

#[async_trait]
impl Agent for PhysicsAgent {
    fn agent_id(&self) -> &str {
        "physics"
    }

    fn name(&self) -> &str {
        "Physics Agent"
    }

    fn role(&self) -> &str {
        "physics"
    }

    async fn handle(&self, query: &str) -> Answer {
        if let Some(name) = Self::extract_constant_phrase(query) {
            debug!("Looking up constant {}", name);
            return match get_constant(&name) {
                Some(value) => Answer::Value(value),
                None => Answer::text(CONSTANT_NOT_FOUND),
            };
        }

        let prompt = format!("{}{}", prompts::PHYSICS_EXPERT, query);
        Answer::Text(llm::ask(self.llm.as_ref(), prompt).await)
    }

    fn get_available_tools(&self) -> Vec<String> {
        vec![PhysicsConstantTool.name().to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::test_support::FakeCompletion;
    use crate::number::Number;

    #[test]
    fn test_phrase_matching_is_narrower_than_alias_extraction() {
        assert_eq!(
            PhysicsAgent::extract_constant_phrase("What is the SPEED OF LIGHT?").as_deref(),
            Some("speed_of_light")
        );
        assert_eq!(PhysicsAgent::extract_constant_phrase("speed_of_light"), None);
        assert_eq!(PhysicsAgent::extract_constant_phrase("speed-of-light"), None);
        assert!(crate::extract_constant_name("speed-of-light").is_some());
    }

    #[test]
    fn test_leftmost_phrase_wins() {
        assert_eq!(
            PhysicsAgent::extract_constant_phrase("proton mass versus electron mass").as_deref(),
            Some("proton_mass")
        );
    }

    #[tokio::test]
    async fn test_returns_constant_value() {
        let llm = Arc::new(FakeCompletion::replying("unused"));
        let agent = PhysicsAgent::new(llm.clone());

        let answer = agent.handle("what is planck constant").await;
        assert_eq!(answer, Answer::Value(Number::Float(6.62607015e-34)));
        assert_eq!(answer.to_string(), "6.62607015e-34");

        let answer = agent.handle("Avogadro Number?").await;
        assert_eq!(answer.to_string(), "6.02214076e+23");
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_to_physics_prompt() {
        let llm = Arc::new(FakeCompletion::replying("F = ma"));
        let agent = PhysicsAgent::new(llm.clone());

        assert_eq!(agent.handle("explain newton's second law").await.to_string(), "F = ma");
        assert_eq!(
            llm.prompts(),
            vec!["You are a physics expert. Answer this question: explain newton's second law"]
        );
    }

    #[test]
    fn test_tools() {
        let agent = PhysicsAgent::new(Arc::new(FakeCompletion::replying("")));
        assert_eq!(agent.get_available_tools(), vec!["physics_constant"]);
    }
}
