//! Read-only views over the diagnosis log for the admin dashboard.

use serde::Serialize;

use crate::db::{DatabaseError, DiagnosisStore};
use crate::models::{DiagnosisRecord, Urgency};

/// Maximum number of records the dashboard lists.
pub const RECENT_DIAGNOSES_LIMIT: usize = 100;

/// Display-only baseline added to the user counter.
const USERS_PLACEHOLDER_BASELINE: u64 = 12453;
const ACCURACY_PLACEHOLDER: &str = "98.2%";

/// Headline numbers for the dashboard. The placeholder fields are not measured.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub totals: u64,
    pub high_urgency: u64,
    pub users_placeholder: u64,
    pub accuracy_placeholder: &'static str,
}

pub fn recent_diagnoses(store: &dyn DiagnosisStore) -> Result<Vec<DiagnosisRecord>, DatabaseError> {
    store.recent(RECENT_DIAGNOSES_LIMIT)
}

pub fn collect_stats(store: &dyn DiagnosisStore) -> Result<AdminStats, DatabaseError> {
    let totals = store.count()?;
    let high_urgency = store.count_by_urgency(Urgency::High)?;
    Ok(AdminStats {
        totals,
        high_urgency,
        users_placeholder: USERS_PLACEHOLDER_BASELINE + totals,
        accuracy_placeholder: ACCURACY_PLACEHOLDER,
    })
}
