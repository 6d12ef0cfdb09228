use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "users")]
#[crudcrate(
    generate_router,
    api_struct = "User",
    name_singular = "user",
    name_plural = "users",
    description = "The user directory: employees whose names are fuzzy-matched against uploaded rota spreadsheets. A user without a name is never considered by the matcher.",
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub name: Option<String>,
    #[sea_orm(unique)]
    #[crudcrate(sortable, filterable)]
    pub email: String,
    #[crudcrate(sortable, filterable)]
    pub role: UserRole,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::routes::schedules::models::Entity")]
    Schedules,
}

impl Related<crate::routes::schedules::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, ToSchema, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum UserRole {
    #[sea_orm(string_value = "ADMIN")]
    #[serde(rename = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "PRODUCER")]
    #[serde(rename = "PRODUCER")]
    Producer,
    #[sea_orm(string_value = "OPERATOR")]
    #[serde(rename = "OPERATOR")]
    Operator,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Producer => "PRODUCER",
            UserRole::Operator => "OPERATOR",
        }
    }

    /// Case-insensitive parse of a role supplied in an upload form.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ADMIN" => Some(UserRole::Admin),
            "PRODUCER" => Some(UserRole::Producer),
            "OPERATOR" => Some(UserRole::Operator),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(UserRole::parse("operator"), Some(UserRole::Operator));
        assert_eq!(UserRole::parse(" Producer "), Some(UserRole::Producer));
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("manager"), None);
    }

    #[test]
    fn role_round_trips_through_display() {
        for role in [UserRole::Admin, UserRole::Producer, UserRole::Operator] {
            assert_eq!(UserRole::parse(&role.to_string()), Some(role));
        }
    }
}
