// ./api/src/error.rs
use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as JsonResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use tracing::{error, warn};

/// JSON body of every error response.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        }
    }
}

/// Maps ApplicationError to an HTTP status code and JSON body.
pub fn map_application_error_to_response(err: ApplicationError) -> Response {
    let (status, message) = match err {
        ApplicationError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        e @ ApplicationError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        ApplicationError::DomainError(domain_err) => {
            warn!("Domain validation failed: {}", domain_err);
            let message = match domain_err {
                DomainError::EntityValidation(notification) => notification.to_string(),
                other => other.to_string(),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, message)
        }
        ApplicationError::InfrastructureError(msg) => {
            error!("Underlying infrastructure error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
            )
        }
    };
    (status, JsonResponse(ErrorBody::new(status, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CategoryId, Notification};

    #[test]
    fn statuses_per_error_kind() {
        let cases = [
            (
                ApplicationError::InvalidInput("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::NotFound {
                    id: CategoryId::new().to_string(),
                    entity: "Category",
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ApplicationError::DomainError(DomainError::InvalidCastMemberType(9)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApplicationError::DomainError(DomainError::EntityValidation(Notification::new())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApplicationError::InfrastructureError("disk".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(map_application_error_to_response(err).status(), expected);
        }
    }

    #[test]
    fn body_names_the_status() {
        let body = ErrorBody::new(StatusCode::NOT_FOUND, "gone".to_string());
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "status_code": 404, "error": "Not Found", "message": "gone" })
        );
    }
}
