//! History view: patient selection and filter state over loaded timelines.
//!
//! The view owns only its own filtered-list field; filter-widget state stays
//! with the caller. Recomputation always starts from the selected patient's
//! full entry list, never from a previously filtered one.

use crate::domain::{FilterState, KindFilter, MonthFilter, Patient, TimelineEntry};

/// In-memory view over an aggregated roster. Caller-facing filter surface.
pub struct HistoryView {
    patients: Vec<Patient>,
    selected: Option<usize>,
    filter: FilterState,
    filtered: Vec<TimelineEntry>,
}

impl HistoryView {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self {
            patients,
            selected: None,
            filter: FilterState::default(),
            filtered: Vec::new(),
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn selected_patient(&self) -> Option<&Patient> {
        self.selected.map(|i| &self.patients[i])
    }

    pub fn filter(&self) -> FilterState {
        self.filter
    }

    /// Entries of the selected patient that pass the current filters,
    /// newest first. Empty when no patient is selected.
    pub fn filtered_entries(&self) -> &[TimelineEntry] {
        &self.filtered
    }

    /// Select a patient by id and reset filters to all-pass.
    /// Returns false (and clears the view) when the id is unknown.
    pub fn select_patient(&mut self, patient_id: &str) -> bool {
        self.selected = self.patients.iter().position(|p| p.id == patient_id);
        self.filter = FilterState::default();
        self.recompute();
        self.selected.is_some()
    }

    /// Apply both filters at once; each is independently optional.
    pub fn apply_filters(&mut self, kind: KindFilter, month: MonthFilter) {
        self.filter = FilterState { kind, month };
        self.recompute();
    }

    /// Reset the view's own filter state and filtered list to the full
    /// unfiltered history of the selected patient.
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.recompute();
    }

    fn recompute(&mut self) {
        let filter = self.filter;
        let filtered = match self.selected_patient() {
            Some(patient) => patient
                .entries
                .iter()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        self.filtered = filtered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};

    fn day(date: &str) -> DateTime<Utc> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn sample_view() -> HistoryView {
        let patient = Patient {
            id: "p1".into(),
            name: "Ana".into(),
            entries: vec![
                TimelineEntry::Exam {
                    date: day("2024-03-01"),
                    exam_name: "EEG".into(),
                    description: "routine".into(),
                    result: "normal".into(),
                },
                TimelineEntry::Emotion {
                    date: day("2024-01-05"),
                    emotion: "calm".into(),
                    notes: String::new(),
                    tags: vec![],
                },
            ],
        };
        let mut view = HistoryView::new(vec![patient]);
        assert!(view.select_patient("p1"));
        view
    }

    #[test]
    fn selection_starts_unfiltered() {
        let view = sample_view();
        assert_eq!(view.filtered_entries().len(), 2);
    }

    #[test]
    fn exam_filter_keeps_only_exams() {
        let mut view = sample_view();
        view.apply_filters(KindFilter::Exam, MonthFilter::All);
        let entries = view.filtered_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_exam());
    }

    #[test]
    fn january_filter_keeps_only_january() {
        let mut view = sample_view();
        view.apply_filters(KindFilter::All, MonthFilter::Month(0));
        let entries = view.filtered_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_emotion());
    }

    #[test]
    fn clear_restores_full_list() {
        let mut view = sample_view();
        view.apply_filters(KindFilter::Exam, MonthFilter::Month(5));
        assert!(view.filtered_entries().is_empty());

        view.clear_filters();
        assert_eq!(view.filtered_entries().len(), 2);
        assert_eq!(view.filter().kind, KindFilter::All);
    }

    #[test]
    fn reselecting_resets_filters() {
        let mut view = sample_view();
        view.apply_filters(KindFilter::Exam, MonthFilter::All);
        assert!(view.select_patient("p1"));
        assert_eq!(view.filtered_entries().len(), 2);
    }

    #[test]
    fn unknown_patient_clears_the_view() {
        let mut view = sample_view();
        assert!(!view.select_patient("nope"));
        assert!(view.selected_patient().is_none());
        assert!(view.filtered_entries().is_empty());
    }
}
