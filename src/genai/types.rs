use async_trait::async_trait;

use super::GenAiError;

/// Binary attachment sent alongside the prompt (image or PDF report).
#[derive(Debug, Clone, PartialEq)]
pub struct InlineAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// One completion request: prompt text plus an optional attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub attachment: Option<InlineAttachment>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
        }
    }

    pub fn is_multimodal(&self) -> bool {
        self.attachment.is_some()
    }
}

/// Generative AI client abstraction (allows mocking)
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Run a single completion and return the model's raw text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenAiError>;

    /// Whether credentials are present. Checked before any network call.
    fn is_configured(&self) -> bool;
}
