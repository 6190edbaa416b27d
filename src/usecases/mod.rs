//! Application use cases. Orchestrate domain logic via ports.

pub mod history_view;
pub mod location_service;
pub mod timeline_service;

pub use history_view::HistoryView;
pub use location_service::{LocationService, DEFAULT_LOCATION};
pub use timeline_service::{FailedPatient, RosterLoad, TimelineService};
