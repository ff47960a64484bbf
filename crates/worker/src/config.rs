use std::time::Duration;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Generator HTTP endpoint the worker posts source text to.
    pub generator_url: String,
    /// Delay between polls of the pending queue.
    pub poll_interval: Duration,
    /// Timeout for a single generator call.
    pub generator_timeout: Duration,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `GENERATOR_URL`             | (required) |
    /// | `WORKER_POLL_INTERVAL_SECS` | `2`     |
    /// | `GENERATOR_TIMEOUT_SECS`    | `60`    |
    pub fn from_env() -> Self {
        let generator_url = std::env::var("GENERATOR_URL").expect("GENERATOR_URL must be set");

        let poll_interval_secs: u64 = std::env::var("WORKER_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("WORKER_POLL_INTERVAL_SECS must be a valid u64");

        let generator_timeout_secs: u64 = std::env::var("GENERATOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("GENERATOR_TIMEOUT_SECS must be a valid u64");

        Self {
            generator_url,
            poll_interval: Duration::from_secs(poll_interval_secs),
            generator_timeout: Duration::from_secs(generator_timeout_secs),
        }
    }
}
