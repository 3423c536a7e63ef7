use axum::extract::rejection::{ JsonRejection, PathRejection };
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Validation failed: {0}")] Validation(ValidationErrors),

    #[error("{0}")] NotFound(String),

    #[error("{0}")] Conflict(String),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

impl AppError {
    pub fn user_not_found(id: i32) -> Self {
        AppError::NotFound(format!("User {} not found", id))
    }

    pub fn strategy_not_found(id: i32) -> Self {
        AppError::NotFound(format!("Strategy {} not found", id))
    }

    pub fn investment_not_found(id: i32) -> Self {
        AppError::NotFound(format!("Investment {} not found", id))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(format!("No record matches this path: {}", rejection.body_text()))
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(serde::Serialize)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: ValidationErrors,
}

impl AppError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let (code, message) = match self {
            AppError::Database(e) => ("PERSISTENCE_ERROR", e.to_string()),
            AppError::Validation(errors) => ("VALIDATION_ERROR", errors.to_string()),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::Conflict(msg) => ("CONFLICT", msg.clone()),
            AppError::InvalidInput(msg) => ("INVALID_INPUT", msg.clone()),
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        match self {
            AppError::Validation(errors) => {
                let body = ValidationErrorResponse {
                    message: "The given data was invalid.".to_string(),
                    errors,
                };
                (status, axum::Json(body)).into_response()
            }
            other => (status, axum::Json(other.to_error_response())).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
