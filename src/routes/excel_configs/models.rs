use crate::routes::users::models::UserRole;
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

/// Admin-defined spreadsheet layout profile. All coordinates are zero-based
/// grid positions. A stored profile for a role takes precedence over the
/// built-in OPERATOR/PRODUCER layouts at import time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "excel_import_configs")]
#[crudcrate(
    generate_router,
    api_struct = "ExcelImportConfig",
    name_singular = "excel import config",
    name_plural = "excel import configs",
    description = "Spreadsheet layout profiles: where the date header row, employee name column and shift grid live, plus cell values to skip during import.",
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[sea_orm(unique)]
    #[crudcrate(sortable, filterable)]
    pub name: String,
    #[crudcrate(sortable, filterable)]
    pub role: UserRole,
    pub date_row: i32,
    pub name_column: i32,
    pub first_name_row: i32,
    pub last_name_row: i32,
    pub first_date_column: i32,
    pub last_date_column: i32,
    /// Comma-separated, case-insensitive cell values ignored by the import
    /// (holiday codes and similar).
    pub skip_values: String,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(list_model = false)]
    pub description: Option<String>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
