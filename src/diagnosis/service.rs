use std::sync::Arc;

use base64::Engine;

use super::parser::parse_diagnosis_response;
use super::prompt::build_diagnosis_prompt;
use super::types::{DiagnosisInput, ReportAttachment};
use super::DiagnosisError;
use crate::db::DiagnosisStore;
use crate::genai::{GenerationRequest, GenerativeClient, InlineAttachment};
use crate::models::DiagnosisRecord;

/// Run one symptom analysis end to end.
///
/// Returns the model's JSON object unchanged. The diagnosis log write is
/// best effort: a storage failure is logged and does not affect the result.
pub async fn analyze_symptoms(
    client: &dyn GenerativeClient,
    store: Arc<dyn DiagnosisStore>,
    input: DiagnosisInput,
) -> Result<serde_json::Value, DiagnosisError> {
    let symptoms = input.symptoms.trim();
    if symptoms.is_empty() {
        return Err(DiagnosisError::MissingSymptoms);
    }

    let attachment = input.report.as_ref().map(decode_report).transpose()?;

    if !client.is_configured() {
        return Err(DiagnosisError::NotConfigured);
    }

    let request = GenerationRequest {
        prompt: build_diagnosis_prompt(symptoms, &input.demographics, attachment.is_some()),
        attachment,
    };

    let started = std::time::Instant::now();
    let response = client.generate(&request).await?;
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        multimodal = request.is_multimodal(),
        "Diagnosis model responded"
    );

    let parsed = match parse_diagnosis_response(&response) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(error = %e, raw = %response, "Could not parse diagnosis response");
            return Err(e);
        }
    };

    let record = DiagnosisRecord::new(
        symptoms,
        &input.demographics,
        parsed.raw.clone(),
        parsed.summary.urgency_level,
        Some(parsed.summary.recommended_specialty.clone()),
    );
    persist_best_effort(store, record).await;

    Ok(parsed.raw)
}

/// Write a record to the log, swallowing (and logging) any failure.
///
/// Returns whether the write succeeded.
pub async fn persist_best_effort(store: Arc<dyn DiagnosisStore>, record: DiagnosisRecord) -> bool {
    let id = record.id;
    let status = record.status;
    match tokio::task::spawn_blocking(move || store.insert(&record)).await {
        Ok(Ok(())) => {
            tracing::info!(%id, %status, "Diagnosis saved");
            true
        }
        Ok(Err(e)) => {
            tracing::warn!(%id, error = %e, "Failed to save diagnosis, continuing");
            false
        }
        Err(e) => {
            tracing::warn!(%id, error = %e, "Diagnosis save task did not complete, continuing");
            false
        }
    }
}

/// Decode a report attachment. Accepts bare base64 or a data URL.
pub fn decode_report(report: &ReportAttachment) -> Result<InlineAttachment, DiagnosisError> {
    let payload = match report.base64.split_once(',') {
        Some((_, data)) => data,
        None => report.base64.as_str(),
    };
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| DiagnosisError::InvalidAttachment(e.to_string()))?;

    Ok(InlineAttachment {
        mime_type: report.mime_type.trim().to_string(),
        data,
    })
}
