//! Generative-AI completion service.
//!
//! `GenerativeClient` abstracts a single prompt → text round trip so the
//! diagnosis pipeline can run against Gemini in production and a mock in
//! tests.

pub mod gemini;
pub mod mock;
pub mod types;

pub use gemini::*;
pub use mock::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("Generative AI API key is not configured")]
    NotConfigured,

    #[error("Cannot reach generative AI service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Generative AI service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Generative AI service returned no text (finish reason: {0})")]
    EmptyResponse(String),
}
