use crate::routes::users::models::UserRole;
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

/// Role-scoped mapping from a cell background colour to a shift definition.
///
/// Rows are created by an administrator, or automatically as "Unnamed Shift"
/// placeholders when an import encounters a colour with no legend entry.
/// Imports never delete legend rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "shift_color_legends")]
#[crudcrate(
    generate_router,
    api_struct = "ColorLegend",
    name_singular = "color legend",
    name_plural = "color legends",
    description = "Colour legend entries map spreadsheet cell background colours to named shifts with start and end times, scoped by user role.",
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub role: UserRole,
    #[crudcrate(sortable, filterable)]
    pub color_code: String,
    #[crudcrate(sortable, filterable)]
    pub color_name: String,
    #[crudcrate(sortable, filterable)]
    pub shift_name: String,
    #[crudcrate(sortable)]
    pub start_time: String,
    #[crudcrate(sortable)]
    pub end_time: String,
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
