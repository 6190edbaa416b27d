//! Infrastructure adapters. Implement outbound ports.
//!
//! Backend HTTP services, geolocation, TUI. Map errors to DomainError.

pub mod backend;
pub mod geo;
pub mod ui;
