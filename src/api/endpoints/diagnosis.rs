//! `POST /api/diagnosis`: symptom analysis.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Deserializer};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::diagnosis::{self, DiagnosisInput, ReportAttachment};
use crate::models::Demographics;

/// Request body. Only `symptoms` is required; the rest is optional context.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub insurance: Option<String>,
    #[serde(default)]
    pub report_base64: Option<String>,
    #[serde(default)]
    pub report_mime: Option<String>,
}

impl DiagnosisRequest {
    /// A report is attached only when both its payload and MIME type are present.
    pub fn into_input(self) -> DiagnosisInput {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let report = match (non_blank(self.report_base64), non_blank(self.report_mime)) {
            (Some(base64), Some(mime_type)) => Some(ReportAttachment { base64, mime_type }),
            _ => None,
        };

        DiagnosisInput {
            symptoms: self.symptoms.unwrap_or_default(),
            demographics: Demographics {
                gender: self.gender,
                age: self.age,
                duration: self.duration,
                city: self.city,
                scheme: self.scheme,
                insurance: self.insurance,
            },
            report,
        }
    }
}

/// Forms send age as a number or as a string; anything unusable becomes `None`.
fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `POST /api/diagnosis`. Responds with the model's JSON object as-is.
pub async fn diagnose(
    State(ctx): State<ApiContext>,
    payload: Result<Json<DiagnosisRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = payload?;
    let input = req.into_input();
    let result =
        diagnosis::analyze_symptoms(ctx.core.genai.as_ref(), ctx.core.store.clone(), input)
            .await?;
    Ok(Json(result))
}
