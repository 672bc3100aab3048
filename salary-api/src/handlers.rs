use std::path::Path;

use axum::{
    Json,
    extract::{Multipart, State},
};
use salary_core::{SalaryRequest, compute_batch};
use salary_data::EmployeeSheetLoader;
use tracing::info;

use crate::dto::{BulkSalaryResponse, HealthResponse, SalaryResponse};
use crate::error::ApiError;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

/// `POST /api/salary/calculate`
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<SalaryRequest>,
) -> Result<Json<SalaryResponse>, ApiError> {
    request.validate()?;

    let result = state.calculator().compute(&request);
    Ok(Json(result.into()))
}

/// `POST /api/salary/upload`
///
/// Reads the first multipart field named `file`; other fields are skipped.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BulkSalaryResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_csv_file_name(&file_name) {
            return Err(ApiError::InvalidFileFormat);
        }

        let bytes = field.bytes().await?;
        let records = EmployeeSheetLoader::parse(bytes.as_ref())?;
        info!(file = %file_name, rows = records.len(), "processing employee sheet");

        let state = state.clone();
        let results = tokio::task::spawn_blocking(move || {
            let calculator = state.calculator();
            compute_batch(&calculator, records)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        return Ok(Json(results.into()));
    }

    Err(ApiError::MissingFile)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn is_csv_file_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_check() {
        assert!(is_csv_file_name("employees.csv"));
        assert!(is_csv_file_name("EMPLOYEES.CSV"));
        assert!(!is_csv_file_name("employees.xlsx"));
        assert!(!is_csv_file_name("employees.csv.txt"));
        assert!(!is_csv_file_name("csv"));
        assert!(!is_csv_file_name(""));
    }
}
