use serde::{Deserialize, Serialize};

use crate::models::{Demographics, Urgency};

/// Number of candidate conditions the model must return.
pub const EXPECTED_CONDITIONS: usize = 3;

/// Report attached to a diagnosis request, as received on the wire.
#[derive(Debug, Clone)]
pub struct ReportAttachment {
    /// Bare base64 or a `data:<mime>;base64,<payload>` URL.
    pub base64: String,
    pub mime_type: String,
}

/// Validated input to the symptom analysis.
#[derive(Debug, Clone)]
pub struct DiagnosisInput {
    pub symptoms: String,
    pub demographics: Demographics,
    pub report: Option<ReportAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub explanation: String,
}

/// Typed view of the fields the service relies on.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosisSummary {
    pub conditions: Vec<Condition>,
    pub recommended_specialty: String,
    pub urgency_level: Urgency,
    #[serde(default)]
    pub advice: Option<String>,
}

/// A model response that passed validation.
///
/// `raw` is what the caller receives, byte-for-byte what the model said
/// after fence stripping; `summary` is used for the stored record.
#[derive(Debug, Clone)]
pub struct ParsedDiagnosis {
    pub raw: serde_json::Value,
    pub summary: DiagnosisSummary,
}
