use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("No pending submission with id {0}")]
    UnknownSubmission(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidSubmission { .. } => StatusCode::BAD_REQUEST,
            AppError::UnknownSubmission { .. } => StatusCode::NOT_FOUND,
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_their_status_codes() {
        let invalid = AppError::InvalidSubmission("Name must be at least 2 characters".into());
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let unknown = AppError::UnknownSubmission("abc".into());
        assert_eq!(unknown.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_messages_carry_the_detail() {
        let unknown = AppError::UnknownSubmission("abc".into());
        assert_eq!(unknown.to_string(), "No pending submission with id abc");
    }
}
