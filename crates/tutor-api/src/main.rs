//! Tutor API server
//!
//! Serves the tutor as a JSON endpoint (`POST /ask`) and a server-rendered
//! HTML form (`/`).

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tutor_common::{API_KEY_ENV, ProviderConfig, ServerConfig, models, timeouts};
use tutor_core::{Agent, CompletionClient, GeminiService, TutorAgent};

mod api;

/// Command-line arguments for the tutor API server
#[derive(Parser, Debug)]
#[clap(name = "tutor-api", about = "Math, physics and general question tutor")]
struct Args {
    /// Host to bind to
    #[clap(long, default_value = tutor_common::DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[clap(short, long, default_value_t = tutor_common::DEFAULT_PORT)]
    port: u16,

    /// Completion model used for fallback answers
    #[clap(long, default_value = models::DEFAULT_MODEL)]
    model: String,

    /// Completion request timeout in seconds, 0 disables it
    #[clap(long, default_value_t = timeouts::DEFAULT_LLM_TIMEOUT)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tutor API server...");

    let provider = ProviderConfig::from_env()
        .with_model(args.model)
        .with_timeout(Some(args.timeout_secs).filter(|secs| *secs > 0));
    provider.validate()?;
    if provider.api_key.is_none() {
        info!("{} is not set; completion fallback may fail", API_KEY_ENV);
    }

    let llm: Arc<dyn CompletionClient> = Arc::new(GeminiService::new(&provider));
    info!("Completion model: {}", llm.model());

    let tutor = Arc::new(TutorAgent::new(llm));
    info!("Tools available: {:?}", tutor.get_available_tools());

    let server = ServerConfig {
        host: args.host,
        port: args.port,
    };
    let app = api::router(tutor);

    let addr = server.bind_addr();
    info!("Binding to address: {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
