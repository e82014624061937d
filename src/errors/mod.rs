use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{debug, error};
use serde::Serialize;

use crate::db::employee::Conflict;
use crate::utils::validation::ValidationFailure;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(#[from] Conflict),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(failure) => {
                debug!("Rejected employee record ({}): {}", failure.field(), failure)
            }
            AppError::BadRequest(msg) => debug!("Rejected request body: {}", msg),
            AppError::Conflict(conflict) => debug!("Duplicate employee record: {}", conflict),
            AppError::Database(_) | AppError::Template(_) => error!("{}", self),
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}
