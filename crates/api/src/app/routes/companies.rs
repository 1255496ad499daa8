use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use partnerlink_events::{CompanyCreated, Trigger};
use partnerlink_infra::lifecycle::LifecycleOutcome;
use partnerlink_suggestions::CompanySuggestion;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_company))
        .route("/:id/suggestions", get(list_suggestions))
        .route(
            "/:id/suggestions/:suggested_id",
            get(get_suggestion).put(update_suggestion),
        )
        .route("/:id/mail-sequence", get(get_mail_sequence))
}

/// Register the company in the directory, then onboard it.
pub async fn create_company(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCompanyRequest>,
) -> axum::response::Response {
    if let Some(company) = &body.company {
        if let Err(e) = services.directory.register(company.clone()) {
            return errors::domain_error_to_response(e.into());
        }
    }

    let trigger = Trigger::CompanyCreated(CompanyCreated::new(body.company));

    match services.lifecycle.handle(trigger).await {
        Ok(LifecycleOutcome::Onboarded(onboarding)) => {
            (StatusCode::CREATED, Json(dto::onboarding_to_json(&onboarding))).into_response()
        }
        Ok(other) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "unexpected_outcome",
            format!("{other:?}"),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_suggestions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<dto::SuggestionsQuery>,
) -> axum::response::Response {
    let company_id = match dto::parse_company_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let wanted = match query.state.as_deref().map(dto::parse_state).transpose() {
        Ok(state) => state,
        Err(resp) => return resp,
    };

    let result = match wanted {
        Some(state) => {
            let in_state = move |s: &CompanySuggestion| s.state() == state;
            services
                .suggestions
                .get_all_suggestions(company_id, Some(&in_state))
                .await
        }
        None => services.suggestions.get_all_suggestions(company_id, None).await,
    };

    match result {
        Ok(list) => {
            let items: Vec<_> = list.iter().map(dto::suggestion_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_suggestion(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, suggested_id)): Path<(String, String)>,
) -> axum::response::Response {
    let (company_id, suggested_company_id) =
        match (dto::parse_company_id(&id), dto::parse_company_id(&suggested_id)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(resp), _) | (_, Err(resp)) => return resp,
        };

    match services.suggestions.get_one(company_id, suggested_company_id).await {
        Ok(suggestion) => (StatusCode::OK, Json(dto::suggestion_to_json(&suggestion))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_suggestion(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, suggested_id)): Path<(String, String)>,
    Json(body): Json<dto::UpdateSuggestionRequest>,
) -> axum::response::Response {
    let (company_id, suggested_company_id) =
        match (dto::parse_company_id(&id), dto::parse_company_id(&suggested_id)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(resp), _) | (_, Err(resp)) => return resp,
        };
    let requested_state = match dto::requested_state(&body.state) {
        Ok(state) => state,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let trigger = Trigger::suggestion_state_update(company_id, suggested_company_id, requested_state);
    match services.lifecycle.handle(trigger).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_mail_sequence(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let company_id = match dto::parse_company_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.mail.get_sequence(company_id).await {
        Ok(sequence) => (StatusCode::OK, Json(dto::sequence_to_json(&sequence))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
