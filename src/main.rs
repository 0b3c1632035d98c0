use anyhow::Context;
use due_chat_api::{build_app, config::AppConfig, run_server, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    if config.llm.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; queries will answer with an error message");
    }

    let app = build_app(AppState::from_config(&config));

    info!(port = config.port, "starting DUE chat API");
    run_server(app, config.port)
        .await
        .context("server failed")?;

    Ok(())
}
