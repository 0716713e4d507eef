use crate::model::role::Capability;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Every failure a handler can report. Rendered as `{"message": ...}`.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Invalid login ID. Please check your credentials.")]
    InvalidLoginId,

    #[display(fmt = "Invalid password. Password must be at least 6 characters.")]
    PasswordTooShort,

    #[display(fmt = "Invalid password. Please check your credentials.")]
    WrongPassword,

    #[display(fmt = "{}", _0)]
    BadRequest(&'static str),

    /// Body or query that could not be decoded.
    #[display(fmt = "Invalid request: {}", _0)]
    InvalidPayload(String),

    #[display(fmt = "Please fill in all required fields.")]
    MissingInformation,

    #[display(fmt = "start_date cannot be after end_date")]
    InvalidDateRange,

    #[display(fmt = "{}", _0)]
    Unauthorized(&'static str),

    #[display(fmt = "Missing capability: {}", _0)]
    Forbidden(Capability),

    #[display(fmt = "{}", _0)]
    NotFound(&'static str),

    #[display(fmt = "{}", _0)]
    Conflict(&'static str),

    /// Detail is logged, never sent to the client.
    #[display(fmt = "Internal Server Error")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidLoginId
            | AppError::PasswordTooShort
            | AppError::WrongPassword
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_)
            | AppError::InvalidPayload(_)
            | AppError::MissingInformation
            | AppError::InvalidDateRange => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!(error = %detail, "Request failed");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::InvalidLoginId, StatusCode::UNAUTHORIZED)]
    #[case(AppError::PasswordTooShort, StatusCode::UNAUTHORIZED)]
    #[case(AppError::MissingInformation, StatusCode::BAD_REQUEST)]
    #[case(AppError::InvalidPayload("expected value".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::Forbidden(Capability::DecideLeave), StatusCode::FORBIDDEN)]
    #[case(AppError::NotFound("Leave request not found"), StatusCode::NOT_FOUND)]
    #[case(AppError::Conflict("Leave request already processed"), StatusCode::CONFLICT)]
    #[case(AppError::Internal("lock".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_to_status(#[case] error: AppError, #[case] status: StatusCode) {
        assert_eq!(error.status_code(), status);
    }

    #[test]
    fn internal_detail_is_hidden() {
        let error = AppError::Internal("password hash corrupt".into());
        assert_eq!(error.to_string(), "Internal Server Error");
    }

    #[test]
    fn forbidden_names_the_capability() {
        assert_eq!(
            AppError::Forbidden(Capability::ViewDirectory).to_string(),
            "Missing capability: view_directory"
        );
    }
}
