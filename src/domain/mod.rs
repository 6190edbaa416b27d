//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod media_gate;

pub use entities::{
    EntryKind, FilterState, GeoPoint, KindFilter, MediaItem, MediaKind, MediaReference,
    MonthFilter, Patient, PatientRef, TimelineEntry,
};
pub use errors::DomainError;
pub use media_gate::EmbedDecision;
