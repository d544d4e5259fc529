use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{GenerationRequest, GenerativeClient};
use super::GenAiError;

/// Mock generative client for testing. Returns a configurable response
/// and records every request it receives.
pub struct MockGenerativeClient {
    outcome: MockOutcome,
    configured: bool,
    requests: Mutex<Vec<GenerationRequest>>,
}

enum MockOutcome {
    Text(String),
    ApiError { status: u16, body: String },
}

impl MockGenerativeClient {
    pub fn new(response: &str) -> Self {
        Self {
            outcome: MockOutcome::Text(response.to_string()),
            configured: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with an upstream status error.
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            outcome: MockOutcome::ApiError {
                status,
                body: body.to_string(),
            },
            configured: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Behave as if no API key were configured.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenAiError> {
        if !self.configured {
            return Err(GenAiError::NotConfigured);
        }
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match &self.outcome {
            MockOutcome::Text(text) => Ok(text.clone()),
            MockOutcome::ApiError { status, body } => Err(GenAiError::Api {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
