use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use salary_core::SalaryRequestError;
use salary_data::EmployeeSheetError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by the HTTP handlers. Rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid file format. Please upload a CSV file.")]
    InvalidFileFormat,

    #[error("No file uploaded. Send the sheet in a multipart field named 'file'.")]
    MissingFile,

    #[error("{0}")]
    Sheet(#[from] EmployeeSheetError),

    #[error("{0}")]
    InvalidRequest(#[from] SalaryRequestError),

    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFileFormat | ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::Sheet(EmployeeSheetError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Sheet(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Multipart(err) => err.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(%status, %detail, "request failed");
        } else {
            warn!(%status, %detail, "request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
