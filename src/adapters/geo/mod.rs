//! Geolocation adapters: IP-based lookup and the optional configured position.

pub mod device;
pub mod ipapi;

pub use device::ConfiguredPosition;
pub use ipapi::IpApiAdapter;
