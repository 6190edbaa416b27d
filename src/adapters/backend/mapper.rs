//! Maps backend wire DTOs to domain entities.
//!
//! The backend speaks Spanish on the wire (`nombre`, `pacientes`); domain
//! types stay English. Entries with unparseable dates are dropped with a
//! warning — the timeline invariant requires a valid point in time.

use crate::domain::{PatientRef, TimelineEntry};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// Roster wire record: `{id, nombre}`.
#[derive(Debug, Deserialize)]
pub struct PacienteDto {
    pub id: String,
    pub nombre: String,
}

/// Diary response envelope: `{entries: [...]}`. A missing list means no entries.
#[derive(Debug, Deserialize)]
pub struct DiarioDto {
    #[serde(default)]
    pub entries: Vec<EmotionDto>,
}

#[derive(Debug, Deserialize)]
pub struct EmotionDto {
    pub date: String,
    pub emotion: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Exam response envelope: `{entries: [...]}`.
#[derive(Debug, Deserialize)]
pub struct ExamenesDto {
    #[serde(default)]
    pub entries: Vec<ExamDto>,
}

#[derive(Debug, Deserialize)]
pub struct ExamDto {
    pub date: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub result: String,
}

pub fn map_patient_ref(dto: PacienteDto) -> PatientRef {
    PatientRef {
        id: dto.id,
        name: dto.nombre,
    }
}

pub fn map_emotions(dtos: Vec<EmotionDto>) -> Vec<TimelineEntry> {
    dtos.into_iter()
        .filter_map(|dto| {
            let Some(date) = parse_date(&dto.date) else {
                warn!(date = %dto.date, "skipping diary entry with unparseable date");
                return None;
            };
            Some(TimelineEntry::Emotion {
                date,
                emotion: dto.emotion,
                notes: dto.notes,
                tags: dto.tags.unwrap_or_default(),
            })
        })
        .collect()
}

pub fn map_exams(dtos: Vec<ExamDto>) -> Vec<TimelineEntry> {
    dtos.into_iter()
        .filter_map(|dto| {
            let Some(date) = parse_date(&dto.date) else {
                warn!(date = %dto.date, "skipping exam entry with unparseable date");
                return None;
            };
            Some(TimelineEntry::Exam {
                date,
                exam_name: dto.name,
                description: dto.description,
                result: dto.result,
            })
        })
        .collect()
}

/// Parse the date formats the backend emits: RFC 3339, a naive datetime,
/// or a bare date (taken as midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_date("2024-03-01T10:30:00-04:00").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn parses_naive_datetime_and_bare_date() {
        assert!(parse_date("2024-03-01T10:30:00").is_some());
        let midnight = parse_date("2024-01-05").unwrap();
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn bad_dates_are_skipped_not_fatal() {
        let entries = map_emotions(vec![
            EmotionDto {
                date: "2024-01-05".into(),
                emotion: "calm".into(),
                notes: String::new(),
                tags: None,
            },
            EmotionDto {
                date: "???".into(),
                emotion: "sad".into(),
                notes: String::new(),
                tags: None,
            },
        ]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_emotion());
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let entries = map_emotions(vec![EmotionDto {
            date: "2024-01-05".into(),
            emotion: "calm".into(),
            notes: "ok".into(),
            tags: None,
        }]);
        match &entries[0] {
            TimelineEntry::Emotion { tags, .. } => assert!(tags.is_empty()),
            other => panic!("expected emotion entry, got {other:?}"),
        }
    }

    #[test]
    fn maps_spanish_roster_fields() {
        let p = map_patient_ref(PacienteDto {
            id: "p1".into(),
            nombre: "Ana Flores".into(),
        });
        assert_eq!(p.name, "Ana Flores");
    }
}
