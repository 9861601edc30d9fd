//! HTTP error payloads and the response envelope.
//!
//! Every mutating endpoint answers `{success, message, data?, errors?}`;
//! this module owns both halves of that contract. Domain failures are
//! translated here so the domain stays free of transport concerns.

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::auth::AuthError;

/// Success envelope for endpoints that return data.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for this envelope.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Endpoint-specific payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` with a generic success message.
    pub fn success(data: T) -> Self {
        Self::with_message("OK", data)
    }

    /// Wrap `data` with an explicit message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Success envelope for endpoints that only report an outcome.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Always `true` for this envelope.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

impl MessageResponse {
    /// Build the envelope.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Failure payload implementing [`ResponseError`].
///
/// Serialized as `{success: false, message, errors?}` with the HTTP status
/// carried out of band.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// 400 with a message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::plain(StatusCode::BAD_REQUEST, message)
    }

    /// 401 with a message.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::plain(StatusCode::UNAUTHORIZED, message)
    }

    /// 404 with a message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::plain(StatusCode::NOT_FOUND, message)
    }

    /// 422 with field-keyed validation messages.
    #[must_use]
    pub fn unprocessable(
        message: impl Into<String>,
        errors: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
            errors: Some(errors),
        }
    }

    /// 500 with a fixed public message; the detail goes to the log only.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        error!(detail = %detail.into(), "internal error promoted to API error");
        Self::plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    fn plain(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// The message clients will see.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ApiErrorBody {
            success: false,
            message: &self.message,
            errors: self.errors.as_ref(),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Validation { errors } => {
                Self::unprocessable("The given data was invalid.", errors)
            }
            AuthError::InvalidCredentials => Self::unauthorized("Invalid email or password."),
            AuthError::NotFound => Self::not_found("Account not found."),
            AuthError::InvalidResetToken => {
                Self::unprocessable("This reset link is invalid or has expired.", BTreeMap::new())
            }
            AuthError::Hashing => Self::internal("password hashing failure"),
        }
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn error_body_carries_the_failure_envelope() {
        let mut errors = BTreeMap::new();
        errors.insert("email".to_owned(), vec!["Taken.".to_owned()]);
        let error = ApiError::unprocessable("The given data was invalid.", errors);

        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[rstest]
    fn auth_errors_map_to_expected_statuses() {
        let unauthorized = ApiError::from(AuthError::InvalidCredentials);
        assert_eq!(unauthorized.status_code(), StatusCode::UNAUTHORIZED);

        let not_found = ApiError::from(AuthError::NotFound);
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    fn internal_errors_hide_their_detail() {
        let error = ApiError::internal("database exploded");
        assert_eq!(error.message(), "Internal server error");
    }

    #[rstest]
    fn success_envelope_serialises_flat() {
        let envelope = ApiResponse::with_message("Created", serde_json::json!({"id": 1}));
        let value = serde_json::to_value(&envelope).expect("envelope should serialise");
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Created");
        assert_eq!(value["data"]["id"], 1);
    }
}
