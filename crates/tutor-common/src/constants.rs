//! Common constants used across the tutor

/// Default bind host for the web server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port for the web server
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable holding the completion API credential
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Marker prepended to completion failures when they are shown as answers
pub const COMPLETION_ERROR_PREFIX: &str = "Gemini API Error: ";

/// Common model identifiers
pub mod models {
    pub const GEMINI_2_0_FLASH: &str = "gemini-2.0-flash";

    /// Model used when none is configured
    pub const DEFAULT_MODEL: &str = GEMINI_2_0_FLASH;
}

/// Common provider identifiers
pub mod providers {
    pub const GOOGLE: &str = "google";
}

/// Framing prompts for the completion fallback
pub mod prompts {
    pub const MATH_EXPERT: &str = "You are a math expert. Answer this question: ";
    pub const PHYSICS_EXPERT: &str = "You are a physics expert. Answer this question: ";
    pub const GENERAL_TUTOR: &str = "You are a helpful tutor. Answer this question: ";
}

/// Default timeout values in seconds
pub mod timeouts {
    pub const DEFAULT_LLM_TIMEOUT: u64 = 120;
}
