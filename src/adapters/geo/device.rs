//! Device position adapter. A CLI host has no geolocation hardware; the
//! closest equivalent is an operator-configured coordinate (e.g. the
//! practice address). Absent configuration means the capability is absent.

use crate::domain::{DomainError, GeoPoint};
use crate::ports::DevicePositionPort;

/// Configured position standing in for the device capability.
pub struct ConfiguredPosition {
    position: GeoPoint,
}

impl ConfiguredPosition {
    pub fn new(position: GeoPoint) -> Self {
        Self { position }
    }
}

#[async_trait::async_trait]
impl DevicePositionPort for ConfiguredPosition {
    async fn current_position(&self) -> Result<GeoPoint, DomainError> {
        Ok(self.position)
    }
}
