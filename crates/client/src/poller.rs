//! Polling observer for a single generation request.
//!
//! The server does not push status changes; clients poll the detail endpoint
//! until the request reaches a terminal status. [`StatusPoller`] owns that
//! loop: fetch immediately, then one re-fetch per [`POLL_INTERVAL`] while the
//! last known status is non-terminal. Dropping the handle cancels the
//! pending timer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{DbId, GenerationRequestDetail};

/// Delay between consecutive status fetches.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Last observed state of the watched request.
///
/// A fetch failure sets `error` but keeps the previously fetched `data`, so
/// observers never lose a status they already saw.
#[derive(Debug, Clone, Default)]
pub struct PollSnapshot {
    pub data: Option<GenerationRequestDetail>,
    pub error: Option<String>,
    pub is_loading: bool,
}

/// Handle to a background polling task.
///
/// Observers subscribe to a `watch` channel and always see the latest
/// snapshot. The task stops on its own once the status is terminal;
/// cancelling (or dropping) the handle stops it early.
pub struct StatusPoller {
    rx: watch::Receiver<PollSnapshot>,
    cancel: CancellationToken,
}

impl StatusPoller {
    /// Start polling `request_id` through the given client.
    pub fn spawn(client: Arc<ApiClient>, request_id: DbId) -> Self {
        Self::spawn_with(move || {
            let client = Arc::clone(&client);
            async move { client.get_generation_request(request_id).await }
        })
    }

    /// Start polling with a caller-supplied fetch function.
    pub fn spawn_with<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<GenerationRequestDetail, ClientError>> + Send,
    {
        let (tx, rx) = watch::channel(PollSnapshot {
            data: None,
            error: None,
            is_loading: true,
        });
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            loop {
                tx.send_modify(|s| s.is_loading = true);

                let result = tokio::select! {
                    r = fetch() => r,
                    () = task_cancel.cancelled() => return,
                };

                let keep_polling = match result {
                    Ok(detail) => {
                        let terminal = detail.is_terminal();
                        tx.send_modify(|s| {
                            s.data = Some(detail);
                            s.error = None;
                            s.is_loading = false;
                        });
                        !terminal
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Status fetch failed");
                        tx.send_modify(|s| {
                            s.error = Some(e.to_string());
                            s.is_loading = false;
                        });
                        // With no successful fetch yet there is no status to
                        // wait on; a terminal status needs no more fetches.
                        tx.borrow().data.as_ref().is_some_and(|d| !d.is_terminal())
                    }
                };

                if !keep_polling {
                    return;
                }

                tokio::select! {
                    _ = tokio::time::sleep(POLL_INTERVAL) => {}
                    () = task_cancel.cancelled() => return,
                }
            }
        });

        StatusPoller { rx, cancel }
    }

    /// A receiver that observes every snapshot update.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.rx.clone()
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> PollSnapshot {
        self.rx.borrow().clone()
    }

    /// Stop polling. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
