use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::types::{GenerationRequest, GenerativeClient};
use super::GenAiError;

/// Gemini `generateContent` client.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenAiError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client,
            timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

/// Response body from `generateContent`
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn build_request_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    let mut parts = vec![Part::Text {
        text: &request.prompt,
    }];
    if let Some(attachment) = &request.attachment {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: &attachment.mime_type,
                data: base64::engine::general_purpose::STANDARD.encode(&attachment.data),
            },
        });
    }
    GenerateContentRequest {
        contents: vec![Content { role: "user", parts }],
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, GenAiError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenAiError::EmptyResponse("no candidates".into()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenAiError::EmptyResponse(
            candidate.finish_reason.unwrap_or_else(|| "unknown".into()),
        ));
    }
    Ok(text)
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenAiError> {
        let api_key = self.api_key.as_deref().ok_or(GenAiError::NotConfigured)?;
        let body = build_request_body(request);

        tracing::debug!(
            model = %self.model,
            multimodal = request.is_multimodal(),
            prompt_chars = request.prompt.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GenAiError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    GenAiError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    GenAiError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::ResponseParsing(e.to_string()))?;

        extract_text(parsed)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genai::InlineAttachment;

    #[test]
    fn client_constructor_trims_trailing_slash() {
        let client = GeminiClient::new(
            "https://generativelanguage.googleapis.com/",
            "gemini-2.5-flash",
            None,
            60,
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(client.timeout_secs, 60);
    }

    #[test]
    fn configured_only_with_key() {
        let without = GeminiClient::new("http://localhost", "m", None, 5).unwrap();
        let with = GeminiClient::new("http://localhost", "m", Some("k".into()), 5).unwrap();
        assert!(!without.is_configured());
        assert!(with.is_configured());
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        // Port 9 (discard) is never contacted: the key check comes first.
        let client = GeminiClient::new("http://127.0.0.1:9", "m", None, 1).unwrap();
        let err = client
            .generate(&GenerationRequest::text("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenAiError::NotConfigured));
    }

    #[test]
    fn text_only_body_has_single_part() {
        let request = GenerationRequest::text("describe symptoms");
        let json = serde_json::to_value(build_request_body(&request)).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0]["text"], "describe symptoms");
    }

    #[test]
    fn multimodal_body_encodes_attachment() {
        let request = GenerationRequest {
            prompt: "review report".into(),
            attachment: Some(InlineAttachment {
                mime_type: "image/png".into(),
                data: b"png-bytes".to_vec(),
            }),
        };
        let json = serde_json::to_value(build_request_body(&request)).unwrap();
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "cG5nLWJ5dGVz");
    }

    #[test]
    fn extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn extract_text_without_candidates_fails() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GenAiError::EmptyResponse(_))
        ));
    }

    #[test]
    fn extract_text_reports_finish_reason_when_blank() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        match extract_text(response) {
            Err(GenAiError::EmptyResponse(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected EmptyResponse, got {other:?}"),
        }
    }
}
