use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiszki_worker::{GeneratorClient, Runner, WorkerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiszki_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();
    tracing::info!(
        generator_url = %config.generator_url,
        poll_interval_secs = config.poll_interval.as_secs(),
        "Loaded worker configuration"
    );

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = fiszki_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    fiszki_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection established");

    let generator = GeneratorClient::new(config.generator_url.clone(), config.generator_timeout);
    let runner = Runner::new(pool, generator, config.poll_interval);

    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let handle = tokio::spawn(async move { runner.run(loop_cancel).await });

    shutdown_signal().await;
    tracing::info!("Shutting down worker");
    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(10), handle).await;
    tracing::info!("Worker stopped");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C)");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM");
        }
    }
}
