//! Math agent: evaluates arithmetic found in a question

use crate::agents::{Agent, Answer};
use crate::llm::{self, CompletionClient};
use crate::tools::AiTool;
use crate::tools::calc::{MathTool, calculate};
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;
use tutor_common::prompts;

/// A run of arithmetic characters; whitespace alone counts as a run
static ARITHMETIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+*/().\d\s]+").expect("valid arithmetic pattern"));

/// Answers math questions with the calculator, or the completion API
pub struct MathAgent {
    llm: Arc<dyn CompletionClient>,
}

impl MathAgent {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// The leftmost arithmetic run in `query`
    pub fn extract_expression(query: &str) -> Option<&str> {
        ARITHMETIC_RUN.find(query).map(|m| m.as_str())
    }
}

#[async_trait]
impl Agent for MathAgent {
    fn agent_id(&self) -> &str {
        "math"
    }

    fn name(&self) -> &str {
        "Math Agent"
    }

    fn role(&self) -> &str {
        "math"
    }

    async fn handle(&self, query: &str) -> Answer {
        if let Some(expression) = Self::extract_expression(query) {
            match calculate(expression) {
                Ok(result) => return Answer::Text(format!("The result is: {}", result)),
                Err(e) => debug!("Calculator could not evaluate {:?}: {}", expression, e),
            }
        }

        let prompt = format!("{}{}", prompts::MATH_EXPERT, query);
        Answer::Text(llm::ask(self.llm.as_ref(), prompt).await)
    }

    fn get_available_tools(&self) -> Vec<String> {
        vec![MathTool.name().to_string()]
    }
}
