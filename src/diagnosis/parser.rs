use super::types::{DiagnosisSummary, ParsedDiagnosis, EXPECTED_CONDITIONS};
use super::DiagnosisError;

/// Remove every ```` ```json ```` / ```` ``` ```` marker and trim.
pub fn strip_code_fences(response: &str) -> String {
    response.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the model's text into a validated diagnosis.
pub fn parse_diagnosis_response(response: &str) -> Result<ParsedDiagnosis, DiagnosisError> {
    let cleaned = strip_code_fences(response);

    let raw: serde_json::Value = serde_json::from_str(&cleaned)
        .map_err(|e| DiagnosisError::MalformedResponse(e.to_string()))?;

    if !raw.is_object() {
        return Err(DiagnosisError::UnexpectedShape(
            "top-level value is not an object".into(),
        ));
    }

    let summary: DiagnosisSummary = serde_json::from_value(raw.clone())
        .map_err(|e| DiagnosisError::UnexpectedShape(e.to_string()))?;

    validate_summary(&summary)?;

    Ok(ParsedDiagnosis { raw, summary })
}

fn validate_summary(summary: &DiagnosisSummary) -> Result<(), DiagnosisError> {
    if summary.conditions.len() != EXPECTED_CONDITIONS {
        return Err(DiagnosisError::UnexpectedShape(format!(
            "expected {EXPECTED_CONDITIONS} conditions, got {}",
            summary.conditions.len()
        )));
    }
    if summary
        .conditions
        .iter()
        .any(|c| c.name.trim().is_empty())
    {
        return Err(DiagnosisError::UnexpectedShape(
            "condition with empty name".into(),
        ));
    }
    if summary.recommended_specialty.trim().is_empty() {
        return Err(DiagnosisError::UnexpectedShape(
            "recommended_specialty is empty".into(),
        ));
    }
    Ok(())
}
