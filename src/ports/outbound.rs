//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, GeoPoint, PatientRef, TimelineEntry};

/// Specialist roster service. Lists the patients assigned to a specialist.
#[async_trait::async_trait]
pub trait RosterPort: Send + Sync {
    /// Fetch the patient roster for a specialist id.
    async fn patients_for_specialist(
        &self,
        specialist_id: &str,
    ) -> Result<Vec<PatientRef>, DomainError>;
}

/// Emotion diary service. One record stream per patient.
#[async_trait::async_trait]
pub trait DiaryPort: Send + Sync {
    /// Fetch a patient's emotion-diary entries, already mapped to domain entries.
    async fn fetch_diary(&self, patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError>;
}

/// Exam record service. One record stream per patient.
#[async_trait::async_trait]
pub trait ExamPort: Send + Sync {
    /// Fetch a patient's exam entries, already mapped to domain entries.
    async fn fetch_exams(&self, patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError>;
}

/// IP-based geolocation lookup. Fallback when no device position is available.
#[async_trait::async_trait]
pub trait GeoIpPort: Send + Sync {
    /// Resolve an approximate position from the caller's public IP.
    /// Non-2xx responses or a body missing latitude/longitude are errors.
    async fn lookup(&self) -> Result<GeoPoint, DomainError>;
}

/// Device-reported position capability. Optional on most platforms.
///
/// Implementations return `DomainError::Unsupported` when the capability
/// is absent; the location service treats that as expected, not a failure.
#[async_trait::async_trait]
pub trait DevicePositionPort: Send + Sync {
    /// Current device position. Low accuracy is acceptable.
    async fn current_position(&self) -> Result<GeoPoint, DomainError>;
}
