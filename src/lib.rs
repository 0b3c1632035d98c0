pub mod api;
pub mod completion;
pub mod config;
pub mod context;
pub mod prompt;

use std::sync::Arc;

use axum::Router;
use tokio::{net::TcpListener, signal};
use tracing::info;

use crate::{
    completion::{CompletionClient, OpenAiClient},
    config::AppConfig,
    context::ContextSource,
};

/// Read-only state shared by every request.
pub struct AppState {
    pub completion: Arc<dyn CompletionClient>,
    pub context: ContextSource,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionClient>, context: ContextSource) -> Arc<Self> {
        Arc::new(Self {
            completion,
            context,
        })
    }

    pub fn from_config(config: &AppConfig) -> Arc<Self> {
        let client = OpenAiClient::new(config.llm.clone());
        info!(
            url = %client.url(),
            model = %config.llm.model,
            temperature = config.llm.temperature,
            max_tokens = config.llm.max_tokens,
            context = %config.context.describe(),
            "completion client configured"
        );
        Self::new(Arc::new(client), config.context.clone())
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
