use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Sustained generation-request creations allowed per minute, per user.
    pub generation_rate_per_min: f64,
    /// Burst capacity of the per-user generation rate limiter.
    pub generation_burst: f64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:4321` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `GENERATION_RATE_PER_MIN`  | `5`                     |
    /// | `GENERATION_BURST`         | `5`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:4321".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let generation_rate_per_min: f64 = std::env::var("GENERATION_RATE_PER_MIN")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("GENERATION_RATE_PER_MIN must be a valid f64");

        let generation_burst: f64 = std::env::var("GENERATION_BURST")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("GENERATION_BURST must be a valid f64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            generation_rate_per_min,
            generation_burst,
            jwt,
        }
    }
}
