use super::name_match;
use crate::routes::users::models as users;
use crate::services::models::{MatchingReport, ScheduleEntry};
use std::collections::HashSet;

/// Annotate extracted entries with directory matches and build the matching
/// report. Pure: persistence happens in the import service, never here.
///
/// Two entries resolving to the same user on the same day are an in-sheet
/// collision; the second one is flagged as a duplicate and reported, so at
/// most one row per user and day ever reaches the store from one batch.
pub fn reconcile(
    mut entries: Vec<ScheduleEntry>,
    directory: &[users::Model],
) -> (Vec<ScheduleEntry>, MatchingReport) {
    let mut report = MatchingReport {
        total_entries: entries.len(),
        ..MatchingReport::default()
    };

    let mut seen_pairs = HashSet::new();
    let mut matched_ids = HashSet::new();
    let mut unmatched_seen = HashSet::new();

    for entry in &mut entries {
        match name_match::best_match(&entry.name, directory) {
            Some(user) => {
                entry.matched_user_id = Some(user.id);
                entry.matched_user_name = user.name.clone();
                matched_ids.insert(user.id);

                if !seen_pairs.insert((user.id, entry.date)) {
                    entry.duplicate = true;
                    report
                        .duplicates
                        .push(format!("{} on {}", entry.name, entry.date));
                }
            }
            None => {
                if unmatched_seen.insert(entry.name.to_lowercase()) {
                    report.unmatched_names.push(entry.name.clone());
                }
            }
        }
    }

    report.matched_users = matched_ids.len();
    report.unmatched_users = report.unmatched_names.len();
    (entries, report)
}
