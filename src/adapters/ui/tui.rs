//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Main menu: browse a patient's filtered history, or preview how a media
//! URL would be gated before embedding.

use crate::domain::{media_gate, DomainError, KindFilter, MediaKind, MonthFilter, TimelineEntry};
use crate::ports::InputPort;
use crate::usecases::{HistoryView, LocationService, TimelineService};
use async_trait::async_trait;
use inquire::{Select, Text};
use std::sync::Arc;

/// Month names for the zero-based month filter.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    timeline: Arc<TimelineService>,
    location: Arc<LocationService>,
    specialist_id: String,
}

impl TuiInputPort {
    pub fn new(
        timeline: Arc<TimelineService>,
        location: Arc<LocationService>,
        specialist_id: String,
    ) -> Self {
        Self {
            timeline,
            location,
            specialist_id,
        }
    }

    fn prompt_err(e: inquire::InquireError) -> DomainError {
        DomainError::Input(e.to_string())
    }

    async fn browse_history(&self, specialist_id: &str) -> Result<(), DomainError> {
        let load = self.timeline.load_patients(specialist_id).await?;
        for failed in &load.failed {
            println!(
                "! Could not load history for {} ({}): {}",
                failed.name, failed.id, failed.error
            );
        }
        if load.patients.is_empty() {
            println!("No patients found for specialist '{specialist_id}'.");
            return Ok(());
        }

        let mut view = HistoryView::new(load.patients);
        let options: Vec<String> = view
            .patients()
            .iter()
            .map(|p| format!("{} ({})", p.name, p.id))
            .collect();
        let choice = Select::new("Select a patient", options)
            .raw_prompt()
            .map_err(Self::prompt_err)?;
        let patient_id = view.patients()[choice.index].id.clone();
        view.select_patient(&patient_id);

        loop {
            print_entries(view.filtered_entries());

            let action = Select::new(
                "History view",
                vec![
                    "Filter by type".to_string(),
                    "Filter by month".to_string(),
                    "Clear filters".to_string(),
                    "Back".to_string(),
                ],
            )
            .prompt()
            .map_err(Self::prompt_err)?;

            match action.as_str() {
                "Filter by type" => {
                    let kinds = vec!["all".to_string(), "emotion".to_string(), "exam".to_string()];
                    let picked = Select::new("Entry type", kinds)
                        .prompt()
                        .map_err(Self::prompt_err)?;
                    let kind = match picked.as_str() {
                        "emotion" => KindFilter::Emotion,
                        "exam" => KindFilter::Exam,
                        _ => KindFilter::All,
                    };
                    let month = view.filter().month;
                    view.apply_filters(kind, month);
                }
                "Filter by month" => {
                    let mut months: Vec<String> = vec!["all".to_string()];
                    months.extend(MONTHS.iter().map(|m| m.to_string()));
                    let picked = Select::new("Month", months)
                        .raw_prompt()
                        .map_err(Self::prompt_err)?;
                    let month = match picked.index {
                        0 => MonthFilter::All,
                        i => MonthFilter::Month((i - 1) as u32),
                    };
                    let kind = view.filter().kind;
                    view.apply_filters(kind, month);
                }
                "Clear filters" => view.clear_filters(),
                _ => break,
            }
        }
        Ok(())
    }

    fn preview_media(&self) -> Result<(), DomainError> {
        let url = Text::new("Media URL:").prompt().map_err(Self::prompt_err)?;
        let kinds = vec![
            "unspecified".to_string(),
            "video".to_string(),
            "audio".to_string(),
            "youtube".to_string(),
        ];
        let picked = Select::new("Declared type", kinds)
            .prompt()
            .map_err(Self::prompt_err)?;
        let declared = match picked.as_str() {
            "video" => MediaKind::Video,
            "audio" => MediaKind::Audio,
            "youtube" => MediaKind::Youtube,
            _ => MediaKind::Unspecified,
        };

        let decision = media_gate::decide(&url, declared);
        if decision.is_blocked() {
            println!("BLOCKED -> {}", decision.display_url());
        } else {
            println!("ALLOWED -> {}", decision.display_url());
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let specialist_id = if self.specialist_id.trim().is_empty() {
            Text::new("Specialist id:")
                .prompt()
                .map_err(Self::prompt_err)?
        } else {
            self.specialist_id.clone()
        };

        let location = self.location.resolve().await;
        println!("Map centered at {:.4}, {:.4}", location.lat, location.lng);

        loop {
            let choice = Select::new(
                "Main menu",
                vec![
                    "Browse patient history".to_string(),
                    "Preview media URL".to_string(),
                    "Exit".to_string(),
                ],
            )
            .prompt()
            .map_err(Self::prompt_err)?;

            match choice.as_str() {
                "Browse patient history" => self.browse_history(&specialist_id).await?,
                "Preview media URL" => self.preview_media()?,
                _ => return Ok(()),
            }
        }
    }
}

fn print_entries(entries: &[TimelineEntry]) {
    if entries.is_empty() {
        println!("  (no entries match the current filters)");
        return;
    }
    for entry in entries {
        println!("  {}", format_entry(entry));
    }
}

fn format_entry(entry: &TimelineEntry) -> String {
    match entry {
        TimelineEntry::Emotion {
            date,
            emotion,
            notes,
            tags,
        } => {
            let tag_suffix = if tags.is_empty() {
                String::new()
            } else {
                format!("  #{}", tags.join(" #"))
            };
            format!(
                "{}  [emotion] {}: {}{}",
                date.format("%Y-%m-%d"),
                emotion,
                notes,
                tag_suffix
            )
        }
        TimelineEntry::Exam {
            date,
            exam_name,
            description,
            result,
        } => format!(
            "{}  [exam]    {}: {} ({})",
            date.format("%Y-%m-%d"),
            exam_name,
            description,
            result
        ),
    }
}
