//! Evaluator — sends a built prompt to the model and hands back the raw reply.

use std::sync::Arc;

use tracing::debug;

use crate::llm_client::{CompletionProvider, LlmError};

/// Reply budget. A compliant reply is a score line and a few paragraphs.
pub const MAX_TOKENS: u32 = 2000;
/// Low-variance sampling keeps the reply close to the requested layout.
pub const TEMPERATURE: f32 = 0.3;

#[derive(Clone)]
pub struct Evaluator {
    provider: Arc<dyn CompletionProvider>,
}

impl Evaluator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Returns the model's raw reply. Provider failures propagate to the caller.
    pub async fn evaluate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!("Requesting evaluation ({} prompt chars)", prompt.len());
        self.provider
            .complete(prompt, MAX_TOKENS, TEMPERATURE)
            .await
    }
}
