//! Location resolution: device position -> IP lookup -> fixed default.
//!
//! Total operation: every failure branch logs and falls through, nothing
//! propagates to the caller.

use crate::domain::{DomainError, GeoPoint};
use crate::ports::{DevicePositionPort, GeoIpPort};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Upper bound on the device-position attempt.
const DEVICE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Coordinate used when both the device and the IP lookup fail.
pub const DEFAULT_LOCATION: GeoPoint = GeoPoint {
    lat: -17.371486977105853,
    lng: -66.1439330529856,
};

/// Location service. The device port is optional; most deployments only
/// carry the IP fallback.
pub struct LocationService {
    device: Option<Arc<dyn DevicePositionPort>>,
    geo_ip: Arc<dyn GeoIpPort>,
}

impl LocationService {
    pub fn new(device: Option<Arc<dyn DevicePositionPort>>, geo_ip: Arc<dyn GeoIpPort>) -> Self {
        Self { device, geo_ip }
    }

    /// Resolve a coordinate. Never fails: device first (bounded by a fixed
    /// timeout), then IP geolocation, then the fixed default.
    pub async fn resolve(&self) -> GeoPoint {
        if let Some(device) = &self.device {
            match timeout(DEVICE_TIMEOUT, device.current_position()).await {
                Ok(Ok(point)) => {
                    info!(lat = point.lat, lng = point.lng, "device position resolved");
                    return point;
                }
                Ok(Err(DomainError::Unsupported(reason))) => {
                    debug!(reason, "device position capability absent");
                }
                Ok(Err(e)) => warn!(error = %e, "device position failed"),
                Err(_) => warn!(
                    timeout_ms = DEVICE_TIMEOUT.as_millis() as u64,
                    "device position timed out"
                ),
            }
        } else {
            debug!("no device position capability configured");
        }

        match self.geo_ip.lookup().await {
            Ok(point) => {
                info!(lat = point.lat, lng = point.lng, "ip geolocation resolved");
                point
            }
            Err(e) => {
                warn!(error = %e, "ip geolocation failed, using default location");
                DEFAULT_LOCATION
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDevice(GeoPoint);

    #[async_trait::async_trait]
    impl DevicePositionPort for FixedDevice {
        async fn current_position(&self) -> Result<GeoPoint, DomainError> {
            Ok(self.0)
        }
    }

    struct DeniedDevice;

    #[async_trait::async_trait]
    impl DevicePositionPort for DeniedDevice {
        async fn current_position(&self) -> Result<GeoPoint, DomainError> {
            Err(DomainError::Geolocation("permission denied".into()))
        }
    }

    struct StubGeoIp(Option<GeoPoint>);

    #[async_trait::async_trait]
    impl GeoIpPort for StubGeoIp {
        async fn lookup(&self) -> Result<GeoPoint, DomainError> {
            self.0
                .ok_or_else(|| DomainError::Geolocation("service unreachable".into()))
        }
    }

    const LA_PAZ: GeoPoint = GeoPoint {
        lat: -16.4897,
        lng: -68.1193,
    };

    #[tokio::test]
    async fn device_position_wins() {
        let svc = LocationService::new(
            Some(Arc::new(FixedDevice(LA_PAZ))),
            Arc::new(StubGeoIp(None)),
        );
        assert_eq!(svc.resolve().await, LA_PAZ);
    }

    #[tokio::test]
    async fn denial_falls_back_to_ip() {
        let svc = LocationService::new(
            Some(Arc::new(DeniedDevice)),
            Arc::new(StubGeoIp(Some(LA_PAZ))),
        );
        assert_eq!(svc.resolve().await, LA_PAZ);
    }

    #[tokio::test]
    async fn everything_failing_yields_the_default() {
        let svc = LocationService::new(Some(Arc::new(DeniedDevice)), Arc::new(StubGeoIp(None)));
        assert_eq!(svc.resolve().await, DEFAULT_LOCATION);
    }

    #[tokio::test]
    async fn absent_capability_goes_straight_to_ip() {
        let svc = LocationService::new(None, Arc::new(StubGeoIp(Some(LA_PAZ))));
        assert_eq!(svc.resolve().await, LA_PAZ);
    }
}
