//! IP geolocation adapter. Implements GeoIpPort against the ipapi.co JSON endpoint.

use crate::domain::{DomainError, GeoPoint};
use crate::ports::GeoIpPort;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://ipapi.co/json/";

/// ipapi.co adapter. The endpoint is configurable for self-hosted mirrors.
pub struct IpApiAdapter {
    client: Client,
    endpoint: String,
}

/// Response body; only the coordinate fields matter. Either one missing
/// means the lookup failed.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl IpApiAdapter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for IpApiAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait::async_trait]
impl GeoIpPort for IpApiAdapter {
    async fn lookup(&self) -> Result<GeoPoint, DomainError> {
        debug!(endpoint = %self.endpoint, "ip geolocation request");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| DomainError::Geolocation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::Geolocation(format!(
                "ip service error {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Geolocation(format!("invalid response body: {e}")))?;

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lng)) => Ok(GeoPoint { lat, lng }),
            _ => Err(DomainError::Geolocation(
                "response missing latitude/longitude".into(),
            )),
        }
    }
}
