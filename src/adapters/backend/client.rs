//! HTTP backend adapter. Implements the roster, diary and exam ports against
//! the REST backend (`/especialistas`, `/emociones`, `/examenes` routes).

use crate::adapters::backend::mapper;
use crate::domain::{DomainError, PatientRef, TimelineEntry};
use crate::ports::{DiaryPort, ExamPort, RosterPort};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Backend REST client. One adapter implements all three record ports;
/// the services are routes of the same backend.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend adapter for the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T, E>(&self, path: &str, map_err: E) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
        E: Fn(String) -> DomainError,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "backend request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_err(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(map_err(format!("backend error {status}: {text}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| map_err(format!("invalid response body: {e}")))
    }
}

#[async_trait::async_trait]
impl RosterPort for HttpBackend {
    async fn patients_for_specialist(
        &self,
        specialist_id: &str,
    ) -> Result<Vec<PatientRef>, DomainError> {
        let dtos: Vec<mapper::PacienteDto> = self
            .get_json(
                &format!("/especialistas/{specialist_id}/pacientes"),
                DomainError::Roster,
            )
            .await?;
        Ok(dtos.into_iter().map(mapper::map_patient_ref).collect())
    }
}

#[async_trait::async_trait]
impl DiaryPort for HttpBackend {
    async fn fetch_diary(&self, patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError> {
        let dto: mapper::DiarioDto = self
            .get_json(&format!("/emociones/diario/{patient_id}"), DomainError::Diary)
            .await?;
        Ok(mapper::map_emotions(dto.entries))
    }
}

#[async_trait::async_trait]
impl ExamPort for HttpBackend {
    async fn fetch_exams(&self, patient_id: &str) -> Result<Vec<TimelineEntry>, DomainError> {
        let dto: mapper::ExamenesDto = self
            .get_json(&format!("/examenes/{patient_id}"), DomainError::Exam)
            .await?;
        Ok(mapper::map_exams(dto.entries))
    }
}
