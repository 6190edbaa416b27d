//! Application configuration. Backend URL, specialist identity, geolocation.

use crate::domain::GeoPoint;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the REST backend. Read from HISTORIAL_BACKEND_URL.
    /// When unset, the mock backend is used.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Specialist identity used to resolve the roster. Read from HISTORIAL_SPECIALIST_ID.
    #[serde(default)]
    pub specialist_id: Option<String>,

    /// IP geolocation endpoint. Read from HISTORIAL_GEOIP_URL. Defaults to ipapi.co.
    #[serde(default)]
    pub geoip_url: Option<String>,

    /// Configured practice latitude. Read from HISTORIAL_POSITION_LAT.
    /// Stands in for the device position capability; requires the longitude too.
    #[serde(default)]
    pub position_lat: Option<f64>,

    /// Configured practice longitude. Read from HISTORIAL_POSITION_LNG.
    #[serde(default)]
    pub position_lng: Option<f64>,

    /// Simulated latency of the mock backend in ms. Read from HISTORIAL_MOCK_DELAY_MS.
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("HISTORIAL"));
        if let Ok(path) = std::env::var("HISTORIAL_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the backend base URL if configured.
    pub fn backend_url(&self) -> Option<String> {
        self.backend_url
            .clone()
            .or_else(|| std::env::var("HISTORIAL_BACKEND_URL").ok())
    }

    /// Returns the specialist id, or an empty string (which resolves to an
    /// empty roster without issuing a request).
    pub fn specialist_id_or_default(&self) -> String {
        self.specialist_id
            .clone()
            .or_else(|| std::env::var("HISTORIAL_SPECIALIST_ID").ok())
            .unwrap_or_default()
    }

    /// Returns the IP geolocation endpoint. Defaults to ipapi.co.
    pub fn geoip_url_or_default(&self) -> String {
        self.geoip_url
            .clone()
            .or_else(|| std::env::var("HISTORIAL_GEOIP_URL").ok())
            .unwrap_or_else(|| crate::adapters::geo::ipapi::DEFAULT_ENDPOINT.to_string())
    }

    /// Returns the configured position when both coordinates are set.
    pub fn configured_position(&self) -> Option<GeoPoint> {
        match (self.position_lat, self.position_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }

    /// Returns the mock backend delay. Defaults to 100 ms.
    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(100)
    }
}
