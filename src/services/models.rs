use super::processing::color::ExtractedColor;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One shift cell pulled out of an uploaded rota sheet. Transient: built
/// during extraction, annotated by the reconciler, returned to the caller,
/// never persisted in this shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntry {
    /// Raw employee name as it appears in the sheet.
    pub name: String,
    pub date: NaiveDate,
    /// Raw cell text, usually an hour range like "08-16".
    pub shift_hours: Option<String>,
    pub shift_color: Option<ExtractedColor>,
    /// Resolved from the colour legend when the colour is known.
    pub shift_name: Option<String>,
    pub time_range: Option<String>,
    pub matched_user_id: Option<Uuid>,
    pub matched_user_name: Option<String>,
    /// Set when another entry in the same batch already claimed this
    /// user-and-date pair.
    #[serde(default)]
    pub duplicate: bool,
}

/// Per-call matching summary. Produced fresh on every preview or commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MatchingReport {
    pub total_entries: usize,
    pub matched_users: usize,
    pub unmatched_users: usize,
    pub unmatched_names: Vec<String>,
    /// Human-readable "name on date" strings for in-batch collisions.
    pub duplicates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreviewResult {
    pub success: bool,
    pub data: Vec<ScheduleEntry>,
    pub matching_report: MatchingReport,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommitResult {
    pub success: bool,
    pub imported: usize,
    pub skipped: usize,
    pub matching_report: MatchingReport,
    pub new_colors_detected: usize,
    pub detected_colors: Vec<String>,
}

/// What an upload call returns, depending on the `preview` flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ImportOutcome {
    Preview(PreviewResult),
    Commit(CommitResult),
}
