use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_diagnosis(conn: &Connection, record: &DiagnosisRecord) -> Result<(), DatabaseError> {
    let result_json = serde_json::to_string(&record.result)
        .map_err(|e| DatabaseError::Serialization(e.to_string()))?;

    conn.execute(
        "INSERT INTO diagnoses (id, symptoms, gender, age, duration, city, scheme, insurance,
         result, urgency, recommended_specialty, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            record.id.to_string(),
            record.symptoms,
            record.gender,
            record.age,
            record.duration,
            record.city,
            record.scheme,
            record.insurance,
            result_json,
            record.urgency.as_str(),
            record.recommended_specialty,
            record.status.as_str(),
            // Fixed-width UTC so lexical order equals chronological order.
            record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )?;
    Ok(())
}

/// Most recent records first, at most `limit`.
pub fn list_recent_diagnoses(
    conn: &Connection,
    limit: usize,
) -> Result<Vec<DiagnosisRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, symptoms, gender, age, duration, city, scheme, insurance,
         result, urgency, recommended_specialty, status, created_at
         FROM diagnoses ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt.query_map(params![limit], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<u32>>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
            row.get::<_, String>(9)?,
            row.get::<_, Option<String>>(10)?,
            row.get::<_, String>(11)?,
            row.get::<_, String>(12)?,
        ))
    })?;

    diagnosis_rows_to_vec(rows)
}

pub fn count_diagnoses(conn: &Connection) -> Result<u64, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM diagnoses", [], |row| row.get(0))?;
    Ok(count.max(0) as u64)
}

pub fn count_diagnoses_by_urgency(
    conn: &Connection,
    urgency: Urgency,
) -> Result<u64, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM diagnoses WHERE urgency = ?1",
        params![urgency.as_str()],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as u64)
}

type DiagnosisRow = (
    String,
    String,
    String,
    Option<u32>,
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
);

fn diagnosis_rows_to_vec(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<DiagnosisRow>>,
) -> Result<Vec<DiagnosisRecord>, DatabaseError> {
    let mut records = Vec::new();
    for row in rows {
        let (
            id,
            symptoms,
            gender,
            age,
            duration,
            city,
            scheme,
            insurance,
            result,
            urgency,
            recommended_specialty,
            status,
            created_at,
        ) = row?;
        records.push(DiagnosisRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            symptoms,
            gender,
            age,
            duration,
            city,
            scheme,
            insurance,
            result: serde_json::from_str(&result)
                .map_err(|e| DatabaseError::Serialization(e.to_string()))?,
            urgency: Urgency::from_str(&urgency)?,
            recommended_specialty,
            status: DiagnosisStatus::from_str(&status)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        });
    }
    Ok(records)
}
