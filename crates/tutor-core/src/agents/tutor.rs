//! Tutor agent: classifies a question and delegates it

use crate::agents::{Agent, Answer, MathAgent, PhysicsAgent};
use crate::llm::{self, CompletionClient};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use tutor_common::prompts;

/// Checked before physics keywords, so a query matching both is math
const MATH_KEYWORDS: &[&str] = &[
    "solve", "calculate", "add", "subtract", "multiply", "divide", "+", "-", "*", "/",
    "equation", "math",
];

const PHYSICS_KEYWORDS: &[&str] = &[
    "physics",
    "law",
    "constant",
    "speed of light",
    "planck",
    "gravitational",
    "force",
    "newton",
    "joule",
    "energy",
];

/// Subject a query is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Physics,
    Other,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Math => write!(f, "math"),
            Subject::Physics => write!(f, "physics"),
            Subject::Other => write!(f, "other"),
        }
    }
}

/// Routes questions to the math agent, the physics agent or the completion API
pub struct TutorAgent {
    math_agent: MathAgent,
    physics_agent: PhysicsAgent,
    llm: Arc<dyn CompletionClient>,
}

impl TutorAgent {
    /// Create a tutor whose agents share one completion client
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        TutorAgent {
            math_agent: MathAgent::new(llm.clone()),
            physics_agent: PhysicsAgent::new(llm.clone()),
            llm,
        }
    }

    /// Classify a query by keyword presence
    pub fn classify(query: &str) -> Subject {
        let q = query.to_lowercase();
        if MATH_KEYWORDS.iter().any(|word| q.contains(word)) {
            return Subject::Math;
        }
        if PHYSICS_KEYWORDS.iter().any(|word| q.contains(word)) {
            return Subject::Physics;
        }
        Subject::Other
    }

    /// Classify and dispatch a query
    pub async fn handle_query(&self, query: &str) -> Answer {
        let subject = Self::classify(query);
        info!("Routing query to {}", subject);

        let answer = match subject {
            Subject::Math => self.math_agent.handle(query).await,
            Subject::Physics => self.physics_agent.handle(query).await,
            Subject::Other => {
                let prompt = format!("{}{}", prompts::GENERAL_TUTOR, query);
                Answer::Text(llm::ask(self.llm.as_ref(), prompt).await)
            }
        };
        debug!("Answer: {}", answer);
        answer
    }

    /// The agents queries are delegated to
    pub fn agents(&self) -> Vec<&dyn Agent> {
        vec![&self.math_agent as &dyn Agent, &self.physics_agent]
    }
}

#[async_trait]
impl Agent for TutorAgent {
    fn agent_id(&self) -> &str {
        "tutor"
    }

    fn name(&self) -> &str {
        "AI Tutor Agent"
    }

    fn role(&self) -> &str {
        "tutor"
    }

    async fn handle(&self, query: &str) -> Answer {
        self.handle_query(query).await
    }

    fn get_available_tools(&self) -> Vec<String> {
        self.agents()
            .iter()
            .flat_map(|agent| agent.get_available_tools())
            .collect()
    }
}
