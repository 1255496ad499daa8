//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: collaborator wiring (in-memory adapters, engines, lifecycle)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::io;
use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use partnerlink_infra::workers::{TriggerWorker, WorkerHandle};

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// A built application: the router plus the worker draining the trigger bus.
pub struct App {
    pub router: Router,
    pub services: Arc<services::AppServices>,
    pub worker: WorkerHandle,
}

/// Build the full HTTP router and start the trigger worker.
///
/// Must be called from inside a tokio runtime; the worker runs lifecycle
/// triggers on that runtime.
pub fn build_app(config: &ApiConfig) -> io::Result<App> {
    let runtime = tokio::runtime::Handle::try_current().map_err(io::Error::other)?;
    let services = Arc::new(services::build_services(config));

    let worker = TriggerWorker::spawn(
        "lifecycle-trigger-worker",
        services.bus.as_ref(),
        services.lifecycle.clone(),
        runtime,
    )?;

    let router = Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services.clone()));

    Ok(App {
        router,
        services,
        worker,
    })
}
