use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    studio_observability::init();

    let config = studio_api::config::Config::from_env()?;
    let services = studio_api::app::build_services(&config)?;
    let app = studio_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, platform = config.is_platform, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
