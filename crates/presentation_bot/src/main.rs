//! Bankrot Telegram bot
//!
//! Main entry point for the long-polling bot process.

use std::{sync::Arc, time::Duration};

use ai_core::OpenAiCompletionEngine;
use application::IntakeService;
use infrastructure::{AppConfig, CompletionAdapter, DocumentAdapter};
use integration_telegram::{TelegramClient, TelegramClientConfig};
use presentation_bot::spawn_update_polling_task;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "presentation_bot=debug,integration_telegram=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🤖 Bankrot bot v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let token = match config.telegram.token_str() {
        Some(token) if !token.is_empty() => token.to_owned(),
        _ => anyhow::bail!("Telegram token is not configured (set BANKROT_TELEGRAM_TOKEN)"),
    };

    info!(
        api_base = %config.telegram.api_base,
        model = %config.completion.default_model,
        output_dir = %config.filing.output_dir,
        "Configuration loaded"
    );

    // Initialize the completion engine and bind the pipeline ports
    let engine = OpenAiCompletionEngine::new(config.completion.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize completion client: {e}"))?;

    let completion: Arc<dyn application::ports::CompletionPort> =
        Arc::new(CompletionAdapter::new(Arc::new(engine)));
    let document: Arc<dyn application::ports::DocumentPort> =
        Arc::new(DocumentAdapter::new(config.filing.clone()));
    let intake = Arc::new(IntakeService::new(completion, document));

    if intake.is_available().await {
        info!("Completion provider is reachable");
    } else {
        warn!("Completion provider health check failed, continuing anyway");
    }

    // Initialize the Telegram client and start polling
    let telegram_config =
        TelegramClientConfig::new(token).with_api_base(config.telegram.api_base.clone());
    let telegram = Arc::new(TelegramClient::new(telegram_config)?);

    let polling = spawn_update_polling_task(
        Arc::clone(&telegram),
        Arc::clone(&intake),
        config.telegram.poll_timeout_secs,
        Duration::from_secs(config.telegram.error_backoff_secs),
    );

    info!("🚀 Bot is polling for updates (Ctrl+C to stop)");

    shutdown_signal().await;

    polling.abort();
    info!("👋 Bot shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating shutdown...");
        }
    }
}
