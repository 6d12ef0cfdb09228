use chrono::{DateTime, NaiveDate, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

/// One persisted shift assignment. Unique on (`user_id`, `date`); the Excel
/// import treats a violation of that constraint as "skip", not as a failure.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "schedules")]
#[crudcrate(
    generate_router,
    api_struct = "Schedule",
    name_singular = "schedule",
    name_plural = "schedules",
    description = "Daily shift assignments, one row per user per day, usually produced by the Excel rota import.",
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub user_id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub date: NaiveDate,
    #[crudcrate(filterable)]
    pub shift_color: Option<String>,
    #[crudcrate(filterable)]
    pub shift_hours: Option<String>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::routes::users::models::Entity",
        from = "Column::UserId",
        to = "crate::routes::users::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<crate::routes::users::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
