use super::models::{CommitResult, ImportOutcome, MatchingReport, PreviewResult, ScheduleEntry};
use super::processing::errors::ImportError;
use super::processing::layout::LayoutProfile;
use super::processing::workbook::WorkbookGrid;
use super::processing::{extractor, reconciler};
use crate::common::errors::is_unique_violation;
use crate::routes::color_legends::models as color_legends;
use crate::routes::excel_configs::models as excel_configs;
use crate::routes::schedules::models as schedules;
use crate::routes::users::models::{self as users, UserRole};
use chrono::{Months, NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

/// Parameters of one upload call, already pulled out of the multipart body.
pub struct ImportRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub month: u32,
    pub year: i32,
    pub role: Option<UserRole>,
    pub preview: bool,
}

/// Runs the whole ingestion pipeline: layout resolution, extraction,
/// reconciliation and, unless previewing, the transactional month replace.
pub struct ScheduleImportService {
    db: DatabaseConnection,
}

impl ScheduleImportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn import(&self, request: ImportRequest) -> Result<ImportOutcome, ImportError> {
        if !(1..=12).contains(&request.month) {
            return Err(ImportError::InvalidRequest(format!(
                "month must be between 1 and 12, got {}",
                request.month
            )));
        }
        let first_of_month = NaiveDate::from_ymd_opt(request.year, request.month, 1)
            .ok_or_else(|| {
                ImportError::InvalidRequest(format!("invalid year {}", request.year))
            })?;

        let role = request
            .role
            .unwrap_or_else(|| infer_role(&request.file_name));

        let stored_layout = excel_configs::Entity::find()
            .filter(excel_configs::Column::Role.eq(role))
            .one(&self.db)
            .await?;
        let profile = LayoutProfile::resolve(role, stored_layout.as_ref())?;

        let legends = color_legends::Entity::find()
            .filter(color_legends::Column::Role.eq(role))
            .all(&self.db)
            .await?;

        let grid = WorkbookGrid::load(&request.bytes)?;
        let extracted = extractor::extract(&grid, &profile, &legends, request.month, request.year)?;

        let directory = users::Entity::find()
            .filter(users::Column::Role.eq(role))
            .all(&self.db)
            .await?;
        let (entries, report) = reconciler::reconcile(extracted, &directory);

        tracing::info!(
            role = role.as_str(),
            entries = report.total_entries,
            matched = report.matched_users,
            unmatched = report.unmatched_users,
            preview = request.preview,
            "processed schedule upload '{}'",
            request.file_name
        );

        if request.preview {
            return Ok(ImportOutcome::Preview(PreviewResult {
                success: true,
                data: entries,
                matching_report: report,
            }));
        }

        self.commit(role, first_of_month, &entries, report, &legends)
            .await
    }

    /// Full-month replace inside one transaction: register unknown colours,
    /// delete the month's rows, insert the matched entries. Uniqueness
    /// conflicts on insert are counted as skipped, everything else aborts.
    async fn commit(
        &self,
        role: UserRole,
        first_of_month: NaiveDate,
        entries: &[ScheduleEntry],
        report: MatchingReport,
        legends: &[color_legends::Model],
    ) -> Result<ImportOutcome, ImportError> {
        let first_of_next_month = first_of_month
            .checked_add_months(Months::new(1))
            .ok_or_else(|| ImportError::InvalidRequest("target month out of range".to_string()))?;

        let new_colors = unknown_colors(entries, legends);

        let txn = self.db.begin().await?;

        for code in &new_colors {
            register_placeholder_legend(&txn, role, code).await?;
        }

        schedules::Entity::delete_many()
            .filter(schedules::Column::Date.gte(first_of_month))
            .filter(schedules::Column::Date.lt(first_of_next_month))
            .exec(&txn)
            .await?;

        let mut imported = 0;
        let mut skipped = 0;
        for entry in entries.iter().filter(|e| !e.duplicate) {
            let Some(user_id) = entry.matched_user_id else {
                continue; // unmatched names are reported, never persisted
            };
            let row = schedules::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                date: Set(entry.date),
                shift_color: Set(entry.shift_color.as_ref().map(ToString::to_string)),
                shift_hours: Set(entry.shift_hours.clone()),
                created_at: Set(Utc::now()),
                last_updated: Set(Utc::now()),
            };
            let insert = schedules::Entity::insert(row)
                .on_conflict(
                    OnConflict::columns([schedules::Column::UserId, schedules::Column::Date])
                        .do_nothing()
                        .to_owned(),
                )
                .exec(&txn)
                .await;
            match insert {
                Ok(_) => imported += 1,
                Err(DbErr::RecordNotInserted) => skipped += 1,
                Err(err) if is_unique_violation(&err) => skipped += 1,
                Err(err) => return Err(err.into()),
            }
        }

        txn.commit().await?;

        tracing::info!(
            imported,
            skipped,
            new_colors = new_colors.len(),
            month = %first_of_month,
            "schedule import committed"
        );

        Ok(ImportOutcome::Commit(CommitResult {
            success: true,
            imported,
            skipped,
            matching_report: report,
            new_colors_detected: new_colors.len(),
            detected_colors: new_colors,
        }))
    }
}

/// Colour codes seen in this batch with no legend entry for the role,
/// deduplicated case-insensitively in first-seen order.
fn unknown_colors(entries: &[ScheduleEntry], legends: &[color_legends::Model]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut unknown = Vec::new();
    for entry in entries {
        let Some(color) = &entry.shift_color else {
            continue;
        };
        let code = color.to_string();
        if !seen.insert(code.to_ascii_uppercase()) {
            continue;
        }
        let known = legends
            .iter()
            .any(|legend| legend.color_code.eq_ignore_ascii_case(&code));
        if !known {
            unknown.push(code);
        }
    }
    unknown
}

/// "Unnamed Shift" placeholder so an unknown colour becomes an admin to-do
/// item instead of a silently dropped shift.
async fn register_placeholder_legend(
    txn: &DatabaseTransaction,
    role: UserRole,
    color_code: &str,
) -> Result<(), ImportError> {
    let legend = color_legends::ActiveModel {
        id: Set(Uuid::new_v4()),
        role: Set(role),
        color_code: Set(color_code.to_string()),
        color_name: Set(color_code.to_string()),
        shift_name: Set("Unnamed Shift".to_string()),
        start_time: Set("00:00".to_string()),
        end_time: Set("00:00".to_string()),
        description: Set(Some(
            "Auto-detected during Excel import; edit to assign a shift".to_string(),
        )),
        created_at: Set(Utc::now()),
        last_updated: Set(Utc::now()),
    };
    let insert = color_legends::Entity::insert(legend)
        .on_conflict(
            OnConflict::columns([
                color_legends::Column::Role,
                color_legends::Column::ColorCode,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(txn)
        .await;
    match insert {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(err) if is_unique_violation(&err) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Filename tokens override nothing explicit; they only fill in a missing
/// role. "coordinator" and "producer" both map to the producer template.
fn infer_role(file_name: &str) -> UserRole {
    let lower = file_name.to_lowercase();
    if lower.contains("coordinator") || lower.contains("producer") {
        UserRole::Producer
    } else {
        UserRole::Operator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_inferred_from_filename_tokens() {
        assert_eq!(infer_role("Program Coordinator Martie.xlsx"), UserRole::Producer);
        assert_eq!(infer_role("producer-april.xlsx"), UserRole::Producer);
        assert_eq!(infer_role("rota_martie.xlsx"), UserRole::Operator);
    }

    #[test]
    fn unknown_colors_dedupe_case_insensitively() {
        use crate::services::processing::color::ExtractedColor;
        let entry = |code: &str| ScheduleEntry {
            name: "Ion Popescu".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            shift_hours: None,
            shift_color: ExtractedColor::parse(code),
            shift_name: None,
            time_range: None,
            matched_user_id: None,
            matched_user_name: None,
            duplicate: false,
        };
        let entries = vec![entry("#123456"), entry("#123456"), entry("#ABCDEF")];
        let unknown = unknown_colors(&entries, &[]);
        assert_eq!(unknown, vec!["#123456", "#ABCDEF"]);
    }
}
