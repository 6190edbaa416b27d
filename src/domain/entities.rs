//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/wire types here — these are mapped from adapters.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Patient as listed in a specialist's roster, before history is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRef {
    pub id: String,
    pub name: String,
}

/// A patient with the merged emotion/exam history attached.
///
/// Invariant: `entries` is sorted non-increasing by date (newest first)
/// after aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub entries: Vec<TimelineEntry>,
}

/// One record in a patient's merged history. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineEntry {
    Emotion {
        date: DateTime<Utc>,
        emotion: String,
        notes: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    Exam {
        date: DateTime<Utc>,
        exam_name: String,
        description: String,
        result: String,
    },
}

impl TimelineEntry {
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            TimelineEntry::Emotion { date, .. } | TimelineEntry::Exam { date, .. } => *date,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            TimelineEntry::Emotion { .. } => EntryKind::Emotion,
            TimelineEntry::Exam { .. } => EntryKind::Exam,
        }
    }

    pub fn is_emotion(&self) -> bool {
        self.kind() == EntryKind::Emotion
    }

    pub fn is_exam(&self) -> bool {
        self.kind() == EntryKind::Exam
    }
}

/// Discriminant of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Emotion,
    Exam,
}

/// Type filter for the history view. `All` means no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Emotion,
    Exam,
}

/// Month filter for the history view. `Month` carries a zero-based index (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

/// Ephemeral filter selection, owned by the caller. Never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterState {
    pub kind: KindFilter,
    pub month: MonthFilter,
}

impl FilterState {
    /// True when the entry passes both filters. Each filter is independently optional.
    pub fn matches(&self, entry: &TimelineEntry) -> bool {
        let kind_match = match self.kind {
            KindFilter::All => true,
            KindFilter::Emotion => entry.is_emotion(),
            KindFilter::Exam => entry.is_exam(),
        };
        let month_match = match self.month {
            MonthFilter::All => true,
            MonthFilter::Month(m) => entry.date().month0() == m,
        };
        kind_match && month_match
    }
}

/// Raw media URL plus the kind the catalog declared for it. Immutable gate input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaReference {
    pub url: String,
    #[serde(default)]
    pub declared: MediaKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Youtube,
    #[default]
    Unspecified,
}

impl MediaKind {
    /// MIME hint for a native player element. Audio maps to mpeg, everything else to mp4.
    pub fn mime_hint(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio/mpeg",
            _ => "video/mp4",
        }
    }
}

/// A meditation catalog item: media reference plus optional accessibility tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub title: String,
    pub media: MediaReference,
    #[serde(default)]
    pub subtitles: Option<String>,
    #[serde(default)]
    pub subtitles_en: Option<String>,
    #[serde(default)]
    pub description_track: Option<String>,
    #[serde(default)]
    pub chapters: Option<String>,
}

impl MediaItem {
    pub fn has_subtitles(&self) -> bool {
        self.subtitles.is_some() || self.subtitles_en.is_some()
    }

    pub fn has_accessibility_features(&self) -> bool {
        self.has_subtitles() || self.description_track.is_some() || self.chapters.is_some()
    }
}

/// A geographic coordinate (latitude/longitude in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}
