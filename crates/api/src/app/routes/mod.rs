use axum::{Router, routing::get};

pub mod companies;
pub mod system;
pub mod timers;

/// Router for every lifecycle endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/outbox", get(system::outbox))
        .nest("/companies", companies::router())
        .nest("/timers", timers::router())
}
