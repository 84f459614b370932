use clap::Parser;
use dotenvy::dotenv;
use solution_gateway::config::GatewayConfig;
use solution_gateway::services::gemini::{GeminiClient, TextGenerator};
use solution_gateway::services::storage::{LocalStorageService, StorageService};
use solution_gateway::{AppState, create_app};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port for the HTTP server (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solution_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = GatewayConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("🚀 Starting Solution Gateway...");

    let storage: Arc<dyn StorageService> = Arc::new(LocalStorageService::new(&config.files_dir));
    storage.ensure_ready().await?;

    let generator: Option<Arc<dyn TextGenerator>> = match GeminiClient::from_config(&config)? {
        Some(client) => {
            info!(
                "🤖 Gemini model: {} (timeout {}s)",
                client.model(),
                config.gemini_timeout_secs
            );
            Some(Arc::new(client) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("GEMINI_API_KEY is not set; /gemini will answer with a configuration error");
            None
        }
    };

    let port = config.port;
    let state = AppState {
        config,
        storage: storage.clone(),
        generator,
    };

    let app = create_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("✅ Server is running on http://localhost:{}", port);
    info!("📁 Files directory: {}", storage.root().display());
    info!("📖 Swagger UI: http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = signal::ctrl_c() => info!("⌨️  Ctrl+C received, shutting down..."),
                    _ = terminate.recv() => info!("💤 SIGTERM received, shutting down..."),
                }
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable ({}); waiting for Ctrl+C", e);
                let _ = signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
        info!("⌨️  Ctrl+C received, shutting down...");
    }
}
