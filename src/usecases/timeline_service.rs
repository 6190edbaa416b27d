//! Timeline aggregation: roster -> per-patient diary+exam fetch -> merged history.
//!
//! - Per patient the two record streams are fetched concurrently and joined
//! - Across patients the loads fan out as tasks and all join before returning
//! - One patient's failure does not abort the batch; it is reported alongside
//!   the partial roster

use crate::domain::{DomainError, Patient, PatientRef};
use crate::ports::{DiaryPort, ExamPort, RosterPort};
use std::sync::Arc;
use tracing::{info, warn};

/// Timeline service. Builds merged reverse-chronological patient histories.
pub struct TimelineService {
    roster: Arc<dyn RosterPort>,
    diary: Arc<dyn DiaryPort>,
    exams: Arc<dyn ExamPort>,
}

/// Result of a roster load: the patients that loaded plus the ones that failed.
#[derive(Debug, Default)]
pub struct RosterLoad {
    pub patients: Vec<Patient>,
    pub failed: Vec<FailedPatient>,
}

/// A patient whose diary or exam fetch failed during the batch load.
#[derive(Debug)]
pub struct FailedPatient {
    pub id: String,
    pub name: String,
    pub error: DomainError,
}

impl TimelineService {
    pub fn new(
        roster: Arc<dyn RosterPort>,
        diary: Arc<dyn DiaryPort>,
        exams: Arc<dyn ExamPort>,
    ) -> Self {
        Self {
            roster,
            diary,
            exams,
        }
    }

    /// Load all patients for a specialist with merged histories.
    ///
    /// An empty specialist id resolves to an empty roster without issuing
    /// any request. Failed patients are isolated into `RosterLoad::failed`;
    /// only a roster-level failure propagates as an error.
    pub async fn load_patients(&self, specialist_id: &str) -> Result<RosterLoad, DomainError> {
        if specialist_id.trim().is_empty() {
            info!("no specialist identity, skipping roster load");
            return Ok(RosterLoad::default());
        }

        let refs = self.roster.patients_for_specialist(specialist_id).await?;
        info!(specialist_id, patients = refs.len(), "roster resolved");

        // Fan out one task per patient; handles are awaited in roster order.
        let mut handles = Vec::with_capacity(refs.len());
        for patient_ref in refs {
            let diary = Arc::clone(&self.diary);
            let exams = Arc::clone(&self.exams);
            handles.push(tokio::spawn(load_one(diary, exams, patient_ref)));
        }

        let mut load = RosterLoad::default();
        for handle in handles {
            match handle.await {
                Ok(Ok(patient)) => load.patients.push(patient),
                Ok(Err(failed)) => {
                    warn!(
                        patient_id = %failed.id,
                        error = %failed.error,
                        "patient history load failed, continuing with partial roster"
                    );
                    load.failed.push(failed);
                }
                Err(e) => warn!(error = %e, "patient load task aborted"),
            }
        }

        info!(
            loaded = load.patients.len(),
            failed = load.failed.len(),
            "roster load complete"
        );
        Ok(load)
    }
}

/// Load one patient: fetch both record streams concurrently, merge, sort newest-first.
async fn load_one(
    diary: Arc<dyn DiaryPort>,
    exams: Arc<dyn ExamPort>,
    patient_ref: PatientRef,
) -> Result<Patient, FailedPatient> {
    let (diary_result, exam_result) = tokio::join!(
        diary.fetch_diary(&patient_ref.id),
        exams.fetch_exams(&patient_ref.id)
    );

    let (mut entries, mut exam_entries) = match (diary_result, exam_result) {
        (Ok(d), Ok(x)) => (d, x),
        (Err(error), _) | (_, Err(error)) => {
            return Err(FailedPatient {
                id: patient_ref.id,
                name: patient_ref.name,
                error,
            });
        }
    };

    entries.append(&mut exam_entries);
    // Stable sort: entries with equal dates keep their relative order.
    entries.sort_by(|a, b| b.date().cmp(&a.date()));

    Ok(Patient {
        id: patient_ref.id,
        name: patient_ref.name,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimelineEntry;
    use chrono::{DateTime, NaiveDate, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn day(date: &str) -> DateTime<Utc> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    struct StubRoster {
        refs: Vec<PatientRef>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RosterPort for StubRoster {
        async fn patients_for_specialist(
            &self,
            _specialist_id: &str,
        ) -> Result<Vec<PatientRef>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.refs.clone())
        }
    }

    struct StubDiary;

    #[async_trait::async_trait]
    impl DiaryPort for StubDiary {
        async fn fetch_diary(&self, patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError> {
            if patient_id == "broken" {
                return Err(DomainError::Diary("boom".into()));
            }
            Ok(vec![TimelineEntry::Emotion {
                date: day("2024-01-05"),
                emotion: "calm".into(),
                notes: "slept well".into(),
                tags: vec!["sleep".into()],
            }])
        }
    }

    struct StubExams;

    #[async_trait::async_trait]
    impl ExamPort for StubExams {
        async fn fetch_exams(&self, _patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError> {
            Ok(vec![TimelineEntry::Exam {
                date: day("2024-03-01"),
                exam_name: "EEG".into(),
                description: "routine".into(),
                result: "normal".into(),
            }])
        }
    }

    fn service(refs: Vec<PatientRef>) -> (TimelineService, Arc<StubRoster>) {
        let roster = Arc::new(StubRoster {
            refs,
            calls: AtomicUsize::new(0),
        });
        let svc = TimelineService::new(
            Arc::clone(&roster) as Arc<dyn RosterPort>,
            Arc::new(StubDiary),
            Arc::new(StubExams),
        );
        (svc, roster)
    }

    fn patient_ref(id: &str) -> PatientRef {
        PatientRef {
            id: id.into(),
            name: format!("Patient {id}"),
        }
    }

    #[tokio::test]
    async fn merges_and_sorts_newest_first() {
        let (svc, _) = service(vec![patient_ref("p1")]);
        let load = svc.load_patients("esp-1").await.unwrap();

        assert_eq!(load.patients.len(), 1);
        let entries = &load.patients[0].entries;
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_exam());
        assert_eq!(entries[0].date(), day("2024-03-01"));
        assert!(entries[1].is_emotion());
        assert_eq!(entries[1].date(), day("2024-01-05"));
    }

    #[tokio::test]
    async fn empty_specialist_id_makes_no_request() {
        let (svc, roster) = service(vec![patient_ref("p1")]);
        let load = svc.load_patients("  ").await.unwrap();

        assert!(load.patients.is_empty());
        assert!(load.failed.is_empty());
        assert_eq!(roster.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn one_failed_patient_yields_partial_roster() {
        let (svc, _) = service(vec![patient_ref("p1"), patient_ref("broken"), patient_ref("p3")]);
        let load = svc.load_patients("esp-1").await.unwrap();

        assert_eq!(load.patients.len(), 2);
        assert_eq!(load.failed.len(), 1);
        assert_eq!(load.failed[0].id, "broken");
        // Roster order is preserved for the patients that loaded.
        assert_eq!(load.patients[0].id, "p1");
        assert_eq!(load.patients[1].id, "p3");
    }
}
