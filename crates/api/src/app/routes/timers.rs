use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use partnerlink_core::{CompanyId, MailTypeId};
use partnerlink_events::Trigger;
use partnerlink_infra::lifecycle::LifecycleOutcome;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/fired", post(timer_fired))
}

/// A timer armed for `(company_id, mail_type_id)` has fired.
pub async fn timer_fired(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TimerFiredRequest>,
) -> axum::response::Response {
    let trigger = Trigger::scheduled_mail_due(
        CompanyId::new(body.company_id),
        MailTypeId::new(body.mail_type_id),
    );

    match services.lifecycle.handle(trigger).await {
        Ok(LifecycleOutcome::Timer(outcome)) => {
            (StatusCode::OK, Json(dto::timer_outcome_to_json(&outcome))).into_response()
        }
        Ok(other) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "unexpected_outcome",
            format!("{other:?}"),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}
