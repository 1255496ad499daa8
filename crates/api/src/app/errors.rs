use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use partnerlink_core::{DomainError, ErrorClass};

pub fn status_for(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Unsupported => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorClass::Unavailable => StatusCode::FAILED_DEPENDENCY,
        ErrorClass::Consistency => StatusCode::CONFLICT,
        ErrorClass::Collaborator => StatusCode::BAD_GATEWAY,
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let class = err.class();
    if class == ErrorClass::Collaborator {
        tracing::warn!(error = %err, "collaborator failure");
    }
    json_error(status_for(class), class.as_str(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
