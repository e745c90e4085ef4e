use anyhow::Context;

use billsplit_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    billsplit_observability::init();

    let config = ApiConfig::from_env()?;
    let app = billsplit_api::app::build_app(&config.session);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
