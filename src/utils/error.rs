use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use std::fmt;

/// Server error code for a unique index violation
pub const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    DuplicateKey(String),
    ExportError(String),
    InvalidIdentifier(String),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            AppError::ExportError(msg) => write!(f, "Export error: {}", msg),
            AppError::InvalidIdentifier(id) => write!(f, "Invalid identifier: {}", id),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        let duplicate = match e.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY_CODE,
            ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY_CODE,
            _ => false,
        };

        if duplicate {
            AppError::DuplicateKey(e.to_string())
        } else {
            AppError::DatabaseError(e.to_string())
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidIdentifier(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::ExportError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Server-side failures and store conflicts are logged here and never echoed to the client
        let message = match self {
            AppError::DuplicateKey(_) => {
                log::warn!("⚠️  {}", self);
                "Duplicate key".to_string()
            }
            _ if status.is_server_error() => {
                log::error!("❌ {}", self);
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": message
        }))
    }
}
