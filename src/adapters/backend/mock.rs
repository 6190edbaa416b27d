//! Mock backend for running without a configured server.
//!
//! Returns a small deterministic roster with histories spread across
//! months. Simulates network latency with a configurable delay.

use crate::domain::{DomainError, PatientRef, TimelineEntry};
use crate::ports::{DiaryPort, ExamPort, RosterPort};
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;
use tracing::info;

/// Mock backend adapter. Implements all three record ports in-process.
pub struct MockBackend {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockBackend {
    /// Create a new mock backend with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock backend with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    async fn simulate_latency(&self) {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn day(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("mock date literal")
        .and_hms_opt(9, 0, 0)
        .expect("mock time literal")
        .and_utc()
}

#[async_trait::async_trait]
impl RosterPort for MockBackend {
    async fn patients_for_specialist(
        &self,
        specialist_id: &str,
    ) -> Result<Vec<PatientRef>, DomainError> {
        info!(specialist_id, "[MOCK] serving sample roster");
        self.simulate_latency().await;
        Ok(vec![
            PatientRef {
                id: "pac-001".into(),
                name: "Ana Flores".into(),
            },
            PatientRef {
                id: "pac-002".into(),
                name: "Luis Rocha".into(),
            },
        ])
    }
}

#[async_trait::async_trait]
impl DiaryPort for MockBackend {
    async fn fetch_diary(&self, patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError> {
        self.simulate_latency().await;
        let entries = match patient_id {
            "pac-001" => vec![
                TimelineEntry::Emotion {
                    date: day("2024-01-05"),
                    emotion: "calm".into(),
                    notes: "Slept through the night".into(),
                    tags: vec!["sleep".into()],
                },
                TimelineEntry::Emotion {
                    date: day("2024-02-14"),
                    emotion: "anxious".into(),
                    notes: "Before the follow-up appointment".into(),
                    tags: vec!["appointment".into(), "anxiety".into()],
                },
            ],
            _ => vec![TimelineEntry::Emotion {
                date: day("2024-04-02"),
                emotion: "content".into(),
                notes: "Started the breathing exercises".into(),
                tags: vec![],
            }],
        };
        Ok(entries)
    }
}

#[async_trait::async_trait]
impl ExamPort for MockBackend {
    async fn fetch_exams(&self, patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError> {
        self.simulate_latency().await;
        let entries = match patient_id {
            "pac-001" => vec![TimelineEntry::Exam {
                date: day("2024-03-01"),
                exam_name: "EEG".into(),
                description: "Routine control".into(),
                result: "normal".into(),
            }],
            _ => vec![TimelineEntry::Exam {
                date: day("2024-03-20"),
                exam_name: "Blood panel".into(),
                description: "Fasting".into(),
                result: "pending".into(),
            }],
        };
        Ok(entries)
    }
}
