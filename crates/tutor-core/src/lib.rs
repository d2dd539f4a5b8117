//! Tutor Core - question routing and tool dispatch
//!
//! This crate provides the core functionality of the tutor, including:
//! - A restricted arithmetic evaluator and a physics-constant table
//! - Tools wrapping them for AI assistants
//! - Math, physics and tutor agents that route a question to the right handler
//! - The completion-API client used as a fallback

pub mod agents;
pub mod llm;
pub mod number;
pub mod tools;

// Re-export key types for convenience
pub use agents::{Agent, Answer, MathAgent, PhysicsAgent, Subject, TutorAgent};
pub use llm::{CompletionClient, GeminiService};
pub use number::Number;
pub use tools::AiTool;
pub use tools::calc::{CalcError, MathTool, calculate};
pub use tools::physics_constants::{PhysicsConstantTool, extract_constant_name, get_constant};
