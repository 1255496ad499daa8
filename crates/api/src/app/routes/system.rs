use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Mail handed to the logging mailer so far, oldest first.
pub async fn outbox(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let items: Vec<_> = services
        .mailer
        .sent()
        .into_iter()
        .map(|mail| {
            json!({
                "title": mail.title,
                "content": mail.content,
                "recipients": mail.recipients,
            })
        })
        .collect();
    Json(json!({ "items": items }))
}
