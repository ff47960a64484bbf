use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiszki_db::repositories::SessionRepo;

use fiszki_api::config::ServerConfig;
use fiszki_api::mailer::Mailer;
use fiszki_api::ratelimit::RateLimiter;
use fiszki_api::router::build_app_router;
use fiszki_api::state::AppState;

/// How often the maintenance task runs (rate limiter purge, expired sessions).
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(300);

/// Rate limiter buckets idle longer than this are purged.
const RATE_LIMITER_MAX_IDLE_SECS: f64 = 600.0;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiszki_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = fiszki_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    fiszki_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    fiszki_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Mailer ---
    let mailer = Mailer::from_env();
    if mailer.is_enabled() {
        tracing::info!("SMTP mailer configured");
    } else {
        tracing::warn!("SMTP_HOST not set, password reset emails will only be logged");
    }

    // --- Rate limiter ---
    let rate_limiter = Arc::new(RateLimiter::per_minute(
        config.generation_rate_per_min,
        config.generation_burst,
    ));

    // Periodic maintenance: drop idle rate limiter buckets and delete
    // expired session rows.
    let maintenance_cancel = tokio_util::sync::CancellationToken::new();
    let maintenance_handle = {
        let rate_limiter = Arc::clone(&rate_limiter);
        let pool = pool.clone();
        let cancel = maintenance_cancel.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        rate_limiter.purge_stale(RATE_LIMITER_MAX_IDLE_SECS).await;
                        match SessionRepo::cleanup_expired(&pool).await {
                            Ok(removed) if removed > 0 => {
                                tracing::debug!(removed, "Removed expired sessions");
                            }
                            Ok(_) => {}
                            Err(e) => tracing::error!(error = %e, "Session cleanup failed"),
                        }
                    }
                    () = cancel.cancelled() => break,
                }
            }
        })
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter,
        mailer: Arc::new(mailer),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    maintenance_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), maintenance_handle).await;
    tracing::info!("Maintenance task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
