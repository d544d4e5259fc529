//! Symptom analysis: prompt → generative model → validated JSON → log.

pub mod parser;
pub mod prompt;
pub mod service;
pub mod types;

pub use parser::*;
pub use prompt::*;
pub use service::*;
pub use types::*;

use thiserror::Error;

use crate::genai::GenAiError;

#[derive(Error, Debug)]
pub enum DiagnosisError {
    #[error("Symptoms are required")]
    MissingSymptoms,

    #[error("Attached report is not valid base64: {0}")]
    InvalidAttachment(String),

    #[error("Generative AI service is not configured")]
    NotConfigured,

    #[error("Generative AI call failed: {0}")]
    Upstream(GenAiError),

    #[error("Model response is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("Model response has an unexpected shape: {0}")]
    UnexpectedShape(String),
}

impl From<GenAiError> for DiagnosisError {
    fn from(err: GenAiError) -> Self {
        match err {
            GenAiError::NotConfigured => DiagnosisError::NotConfigured,
            other => DiagnosisError::Upstream(other),
        }
    }
}
