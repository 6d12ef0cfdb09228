use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

use crate::common::state::AppState;
use crate::routes::users::models::UserRole;
use crate::services::import_service::{ImportRequest, ScheduleImportService};
use crate::services::models::ImportOutcome;
use crate::services::processing::errors::ImportError;

/// Upload a monthly rota spreadsheet and import it for the given month.
///
/// With `preview=true` the sheet is processed and reported on without
/// touching the schedule or colour legend stores.
#[utoipa::path(
    post,
    path = "/schedules/upload-excel",
    request_body(content = String, description = "Spreadsheet plus month/year/role/preview fields as multipart/form-data", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import processed", body = ImportOutcome),
        (status = 400, description = "Invalid file or request parameters"),
        (status = 422, description = "Sheet does not match the expected layout"),
        (status = 500, description = "Internal server error")
    ),
    tag = "schedules"
)]
pub async fn upload_schedule_excel(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportOutcome>, (StatusCode, Json<Value>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;
    let mut role: Option<UserRole> = None;
    let mut preview = false;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        bad_request(format!("Multipart error: {e}"))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" | "excel_file" => {
                file_name = field.file_name().map(std::string::ToString::to_string);
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| bad_request(format!("Failed to read file data: {e}")))?
                        .to_vec(),
                );
            }
            "month" => {
                let text = read_text(field).await?;
                month = Some(
                    text.trim()
                        .parse()
                        .map_err(|_| bad_request(format!("Invalid month: {text}")))?,
                );
            }
            "year" => {
                let text = read_text(field).await?;
                year = Some(
                    text.trim()
                        .parse()
                        .map_err(|_| bad_request(format!("Invalid year: {text}")))?,
                );
            }
            "role" => {
                let text = read_text(field).await?;
                role = Some(
                    UserRole::parse(text.trim())
                        .ok_or_else(|| bad_request(format!("Unknown role: {text}")))?,
                );
            }
            "preview" => {
                let text = read_text(field).await?;
                preview = matches!(text.trim().to_lowercase().as_str(), "true" | "1" | "yes");
            }
            _ => {}
        }
    }

    let file_data =
        file_data.ok_or_else(|| bad_request("No spreadsheet file found in request".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "uploaded_schedule.xlsx".to_string());
    let month = month.ok_or_else(|| bad_request("Missing 'month' field".to_string()))?;
    let year = year.ok_or_else(|| bad_request("Missing 'year' field".to_string()))?;

    let extension_ok = std::path::Path::new(&file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls"));
    if !extension_ok {
        return Err(bad_request(
            "File must be an Excel file (.xlsx or .xls)".to_string(),
        ));
    }

    let outcome = ScheduleImportService::new(app_state.db.clone())
        .import(ImportRequest {
            file_name,
            bytes: file_data,
            month,
            year,
            role,
            preview,
        })
        .await
        .map_err(import_error_response)?;

    Ok(Json(outcome))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, (StatusCode, Json<Value>)> {
    field
        .text()
        .await
        .map_err(|e| bad_request(format!("Failed to read form field: {e}")))
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn import_error_response(err: ImportError) -> (StatusCode, Json<Value>) {
    let status = match err {
        ImportError::UnsupportedRole(_)
        | ImportError::InvalidWorkbook(_)
        | ImportError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ImportError::NoDatesFound | ImportError::NoNamesFound => StatusCode::UNPROCESSABLE_ENTITY,
        ImportError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("schedule import failed: {err}");
    }
    (status, Json(json!({ "error": err.to_string() })))
}
