use partnerlink_api::app::build_app;
use partnerlink_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    partnerlink_observability::init();

    let config = ApiConfig::from_env()?;
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        mail_steps = config.mail_sequence.len(),
        "listening"
    );

    axum::serve(listener, app.router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    app.worker.shutdown();
    Ok(())
}
