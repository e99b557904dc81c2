use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Failures raised by the schedule engine itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule configuration error: {0}")]
    Configuration(String),

    #[error("Malformed local time {0:?}, expected HH:MM")]
    MalformedTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Schedule rejected by submission endpoint: {0}")]
    SubmissionRejected(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(e) => {
                let messages: Vec<String> = e
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let codes: Vec<&str> = errors.iter().map(|err| err.code.as_ref()).collect();
                        format!("{}: {}", field, codes.join(", "))
                    })
                    .collect();
                (StatusCode::BAD_REQUEST, messages.join("; "))
            }
            AppError::Schedule(e) => match e {
                ScheduleError::SubmissionRejected(reason) => {
                    tracing::warn!("Schedule submission rejected: {}", reason);
                    (StatusCode::CONFLICT, self.to_string())
                }
                ScheduleError::Configuration(_)
                | ScheduleError::MalformedTime(_)
                | ScheduleError::InvalidDate(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
                }
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
