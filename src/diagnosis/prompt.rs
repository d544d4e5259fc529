use crate::models::Demographics;

const REPORT_NOTE: &str = "The patient has also attached a medical report or image. \
Review it carefully together with the symptoms to make the analysis more accurate.";

/// Build the triage prompt for one patient.
///
/// The model is asked for a bare JSON object; fences are still stripped on
/// the way back because models add them anyway.
pub fn build_diagnosis_prompt(
    symptoms: &str,
    demographics: &Demographics,
    has_report: bool,
) -> String {
    let report_note = if has_report { REPORT_NOTE } else { "" };
    let profile = patient_profile_line(demographics);

    format!(
        r#"You are an expert AI medical assistant for the AarogyaLink platform.
A patient has reported the following symptoms: "{symptoms}".
{profile}{report_note}

Based on this information, provide:
1. Exactly 3 highly probable medical conditions, each with a brief, simple explanation.
2. The single primary medical specialty they should visit (e.g., Cardiologist, General Physician, Neurologist).
3. An urgency level, exactly one of Low, Medium or High, indicating whether they need immediate care.
4. Short general advice.

Format your response strictly as a JSON object, like this:
{{
  "conditions": [
    {{ "name": "Condition 1", "explanation": "Brief explanation" }},
    {{ "name": "Condition 2", "explanation": "Brief explanation" }},
    {{ "name": "Condition 3", "explanation": "Brief explanation" }}
  ],
  "recommended_specialty": "Specialty Name",
  "urgency_level": "Low/Medium/High",
  "advice": "General advice (e.g., drink water, rest, but see a doctor if symptoms persist)"
}}

Do not include any other text output, just the raw JSON object. Do not wrap it in markdown code blocks."#
    )
}

/// "Patient profile: ..." line, or empty when nothing was supplied.
fn patient_profile_line(demographics: &Demographics) -> String {
    let mut fields = Vec::new();
    let mut push = |label: &str, value: Option<&str>| {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            fields.push(format!("{label}: {v}"));
        }
    };
    push("gender", demographics.gender.as_deref());
    let age = demographics.age.map(|a| a.to_string());
    push("age", age.as_deref());
    push("symptom duration", demographics.duration.as_deref());
    push("city", demographics.city.as_deref());

    if fields.is_empty() {
        String::new()
    } else {
        format!("Patient profile: {}.\n", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_quotes_symptoms() {
        let prompt = build_diagnosis_prompt("sore throat", &Demographics::default(), false);
        assert!(prompt.contains("\"sore throat\""));
    }

    #[test]
    fn prompt_requests_exact_shape() {
        let prompt = build_diagnosis_prompt("fever", &Demographics::default(), false);
        assert!(prompt.contains("Exactly 3"));
        assert!(prompt.contains("\"recommended_specialty\""));
        assert!(prompt.contains("\"urgency_level\""));
        assert!(prompt.contains("\"advice\""));
        assert!(prompt.contains("Low, Medium or High"));
        assert!(prompt.contains("Do not wrap it in markdown"));
    }

    #[test]
    fn report_note_only_with_attachment() {
        let without = build_diagnosis_prompt("rash", &Demographics::default(), false);
        let with = build_diagnosis_prompt("rash", &Demographics::default(), true);
        assert!(!without.contains("attached a medical report"));
        assert!(with.contains("attached a medical report"));
    }

    #[test]
    fn profile_line_lists_supplied_fields() {
        let demographics = Demographics {
            gender: Some("Female".into()),
            age: Some(34),
            duration: Some("3 days".into()),
            city: None,
            scheme: Some("AB-PMJAY".into()),
            insurance: None,
        };
        let prompt = build_diagnosis_prompt("nausea", &demographics, false);
        assert!(prompt.contains("Patient profile: gender: Female, age: 34, symptom duration: 3 days."));
        // Coverage details are for the record, not the model.
        assert!(!prompt.contains("AB-PMJAY"));
    }

    #[test]
    fn no_profile_line_without_demographics() {
        let prompt = build_diagnosis_prompt("nausea", &Demographics::default(), false);
        assert!(!prompt.contains("Patient profile"));
    }
}
