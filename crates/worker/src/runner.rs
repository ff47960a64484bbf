//! The claim/generate/complete loop.

use std::time::Duration;

use fiszki_db::repositories::GenerationRepo;
use fiszki_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::generator::GeneratorClient;

/// Background service that drains the pending generation queue.
pub struct Runner {
    pool: DbPool,
    generator: GeneratorClient,
    poll_interval: Duration,
}

impl Runner {
    pub fn new(pool: DbPool, generator: GeneratorClient, poll_interval: Duration) -> Self {
        Self {
            pool,
            generator,
            poll_interval,
        }
    }

    /// Run the worker loop until the token is cancelled.
    ///
    /// Each tick drains every pending request rather than taking one, so a
    /// burst clears in a single tick instead of one request per interval.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("Worker loop cancelled");
                    break;
                }
                _ = interval.tick() => {
                    loop {
                        match self.process_next().await {
                            Ok(true) => continue,
                            Ok(false) => break,
                            Err(e) => {
                                tracing::error!(error = %e, "Failed to process generation request");
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Claim and process one pending request.
    ///
    /// Returns `Ok(false)` when the queue is empty. A generator failure is
    /// not an `Err`: the request is marked failed and processing goes on.
    pub async fn process_next(&self) -> Result<bool, sqlx::Error> {
        let Some(request) = GenerationRepo::claim_next_pending(&self.pool).await? else {
            return Ok(false);
        };

        tracing::info!(request_id = request.id, "Processing generation request");

        match self.generator.generate(&request.source_text).await {
            Ok(cards) => {
                GenerationRepo::complete_with_candidates(&self.pool, request.id, &cards).await?;
                tracing::info!(
                    request_id = request.id,
                    candidates = cards.len(),
                    "Generation request completed"
                );
            }
            Err(e) => {
                let message = e.to_string();
                GenerationRepo::mark_failed(&self.pool, request.id, &message).await?;
                tracing::warn!(
                    request_id = request.id,
                    error = %message,
                    "Generation request failed"
                );
            }
        }

        Ok(true)
    }
}
