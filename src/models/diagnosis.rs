use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DiagnosisStatus, Urgency};

pub const GENDER_PLACEHOLDER: &str = "Not Specified";
pub const DURATION_PLACEHOLDER: &str = "Not Specified";
pub const CITY_PLACEHOLDER: &str = "Not Specified";
pub const SCHEME_PLACEHOLDER: &str = "None provided";
pub const INSURANCE_PLACEHOLDER: &str = "None provided";

/// One stored symptom analysis. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    pub id: Uuid,
    pub symptoms: String,
    pub gender: String,
    pub age: Option<u32>,
    pub duration: String,
    pub city: String,
    pub scheme: String,
    pub insurance: String,
    /// The model's JSON object, exactly as returned to the patient.
    pub result: serde_json::Value,
    pub urgency: Urgency,
    pub recommended_specialty: Option<String>,
    pub status: DiagnosisStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Patient-supplied demographics. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Demographics {
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub duration: Option<String>,
    pub city: Option<String>,
    pub scheme: Option<String>,
    pub insurance: Option<String>,
}

impl DiagnosisRecord {
    /// Build the record for a validated analysis. Status follows urgency.
    pub fn new(
        symptoms: &str,
        demographics: &Demographics,
        result: serde_json::Value,
        urgency: Urgency,
        recommended_specialty: Option<String>,
    ) -> Self {
        fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(placeholder)
                .to_string()
        }

        Self {
            id: Uuid::new_v4(),
            symptoms: symptoms.to_string(),
            gender: or_placeholder(&demographics.gender, GENDER_PLACEHOLDER),
            age: demographics.age,
            duration: or_placeholder(&demographics.duration, DURATION_PLACEHOLDER),
            city: or_placeholder(&demographics.city, CITY_PLACEHOLDER),
            scheme: or_placeholder(&demographics.scheme, SCHEME_PLACEHOLDER),
            insurance: or_placeholder(&demographics.insurance, INSURANCE_PLACEHOLDER),
            result,
            urgency,
            recommended_specialty,
            status: DiagnosisStatus::from_urgency(urgency),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_demographics_get_placeholders() {
        let record = DiagnosisRecord::new(
            "headache",
            &Demographics::default(),
            serde_json::json!({}),
            Urgency::Low,
            Some("Neurologist".into()),
        );
        assert_eq!(record.gender, "Not Specified");
        assert_eq!(record.duration, "Not Specified");
        assert_eq!(record.city, "Not Specified");
        assert_eq!(record.scheme, "None provided");
        assert_eq!(record.insurance, "None provided");
        assert_eq!(record.age, None);
        assert_eq!(record.status, DiagnosisStatus::Completed);
    }

    #[test]
    fn blank_demographics_count_as_missing() {
        let demographics = Demographics {
            gender: Some("  ".into()),
            city: Some("Visakhapatnam".into()),
            ..Default::default()
        };
        let record = DiagnosisRecord::new(
            "cough",
            &demographics,
            serde_json::json!({}),
            Urgency::Medium,
            None,
        );
        assert_eq!(record.gender, "Not Specified");
        assert_eq!(record.city, "Visakhapatnam");
    }

    #[test]
    fn high_urgency_record_is_critical() {
        let record = DiagnosisRecord::new(
            "chest pain",
            &Demographics::default(),
            serde_json::json!({}),
            Urgency::High,
            Some("Cardiologist".into()),
        );
        assert_eq!(record.status, DiagnosisStatus::Critical);
    }

    #[test]
    fn serializes_created_at_with_wire_name() {
        let record = DiagnosisRecord::new(
            "fever",
            &Demographics::default(),
            serde_json::json!({"advice": "rest"}),
            Urgency::Low,
            None,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["urgency"], "Low");
        assert_eq!(json["status"], "Completed");
        assert_eq!(json["result"]["advice"], "rest");
    }
}
