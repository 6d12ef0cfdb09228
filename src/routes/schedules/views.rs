use super::models::{Schedule, ScheduleCreate, ScheduleList, ScheduleUpdate};
use crate::common::auth::Role;
use crate::common::state::AppState;
use axum::routing::post;
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use crudcrate::{CRUDResource, crud_handlers};
use sea_orm::ConnectionTrait;
use utoipa_axum::{router::OpenApiRouter, routes};

crud_handlers!(Schedule, ScheduleUpdate, ScheduleCreate, ScheduleList);

pub fn router(state: &AppState) -> OpenApiRouter
where
    Schedule: CRUDResource,
{
    let mut mutating_router = OpenApiRouter::new()
        .routes(routes!(get_one_handler))
        .routes(routes!(get_all_handler))
        .routes(routes!(create_one_handler))
        .routes(routes!(update_one_handler))
        .routes(routes!(delete_one_handler))
        .routes(routes!(delete_many_handler))
        .with_state(state.db.clone())
        .route(
            "/upload-excel",
            post(super::excel_upload::upload_schedule_excel),
        )
        .with_state(state.clone());

    if let Some(instance) = state.keycloak_auth_instance.clone() {
        mutating_router = mutating_router.layer(
            KeycloakAuthLayer::<Role>::builder()
                .instance(instance)
                .passthrough_mode(PassthroughMode::Block)
                .persist_raw_claims(false)
                .expected_audiences(vec![String::from("account")])
                .required_roles(vec![Role::Administrator])
                .build(),
        );
    } else if !state.config.tests_running {
        tracing::warn!(
            "Mutating routes of {} router are not protected",
            Schedule::RESOURCE_NAME_PLURAL
        );
    }

    mutating_router
}
