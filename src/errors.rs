use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    #[error("Quiz parse failed: {0}")]
    QuizParse(String),

    #[error("Quiz reply malformed: {0}")]
    QuizMalformed(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DocumentParse(_) => StatusCode::BAD_REQUEST,
            AppError::TranscriptUnavailable(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::CompletionFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::QuizParse(_) => StatusCode::BAD_GATEWAY,
            AppError::QuizMalformed(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
