//! Biographical context for the assistant, treated as injected configuration.

use std::{env, fs};

/// Default context bundled into the binary; overridable via environment.
const BUNDLED_CONTEXT: &str = include_str!("../assets/persona.md");

/// Fixed answering guidelines appended to every system prompt.
const ANSWER_GUIDELINES: &str = "\
Guidelines for answering:
1. Be professional but friendly and approachable
2. Give detailed, specific answers grounded in the actual experience
3. When asked about a specific technology, mention relevant projects or roles
4. If something is not covered by the context, say so politely instead of guessing
5. Highlight full-stack experience and technical strengths where relevant
6. Emphasize the interest in continuous learning and new technologies";

/// Opaque biographical context blob plus the prompt assembly around it.
///
/// Swapping the context changes who the assistant speaks for without touching
/// any request logic.
#[derive(Clone, Debug)]
pub struct Persona {
    context: String,
}

impl Persona {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// Resolution order: `PERSONA_FILE` path, `PERSONA_CONTEXT` inline,
    /// bundled default.
    pub fn from_env() -> Self {
        if let Ok(path) = env::var("PERSONA_FILE") {
            match fs::read_to_string(&path) {
                Ok(context) => return Self::new(context),
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "could not read persona file, falling back")
                }
            }
        }

        if let Ok(context) = env::var("PERSONA_CONTEXT") {
            return Self::new(context);
        }

        Self::default()
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// System-role instruction sent with every completion request.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a professional virtual assistant representing the developer described below. \
             Use the following context to answer questions about their experience, skills and career:\n\n\
             {}\n\n{}",
            self.context.trim(),
            ANSWER_GUIDELINES
        )
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(BUNDLED_CONTEXT)
    }
}
