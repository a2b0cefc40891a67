//! Long-polling update loop.
//!
//! The poller owns the offset cursor. Each batch is emitted to the consumer
//! in the order the server returned it, and only then does the cursor move
//! to one past the highest id in the batch. A failed fetch leaves the cursor
//! alone, so the same batch is requested again on the next attempt.


use pigeon_core::{
    config::PollingConfig, error::PigeonError, method::GetUpdates, traits::BotApi, types::Update,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Cursor and request parameters for a [`Poller`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerSettings {
    /// Starting cursor.
    pub offset: i64,
    pub limit: u32,
    /// Server-side long-poll wait, in seconds.
    pub timeout_secs: u64,
    pub allowed_updates: Vec<String>,
    /// Ceiling for the retry delay after consecutive failures.
    pub max_backoff_secs: u64,
}

impl From<&PollingConfig> for PollerSettings {
    fn from(cfg: &PollingConfig) -> Self {
        Self {
            offset: cfg.offset,
            limit: cfg.limit,
            timeout_secs: cfg.timeout_secs,
            allowed_updates: cfg.allowed_updates.clone(),
            max_backoff_secs: cfg.max_backoff_secs,
        }
    }
}

/// Fetches update batches and feeds them to a channel.
pub struct Poller {
    api: Arc<dyn BotApi>,
    cursor: i64,
    settings: PollerSettings,
}

impl Poller {
    pub fn new(api: Arc<dyn BotApi>, settings: PollerSettings) -> Self {
        Self {
            api,
            cursor: settings.offset.max(0),
            settings,
        }
    }

    /// Lowest update id that may still be delivered.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Fetch one batch and advance the cursor past it.
    pub async fn poll_once(&mut self) -> Result<Vec<Update>, PigeonError> {
        let batch = self.fetch().await?;
        self.cursor = next_cursor(self.cursor, &batch);
        Ok(batch)
    }

    /// Poll until cancelled, the receiver goes away, or the token is rejected.
    ///
    /// Transport and API failures are retried with exponential backoff
    /// (1s doubling up to `max_backoff_secs`, or the server's `retry_after`).
    /// An `Unauthorized` or malformed-request error ends the loop with that
    /// error, since retrying cannot fix it.
    pub async fn run(
        mut self,
        tx: mpsc::Sender<Update>,
        cancel: CancellationToken,
    ) -> Result<(), PigeonError> {
        info!("telegram: long polling from offset {}", self.cursor);
        let mut backoff_secs: u64 = 1;

        loop {
            let fetched = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("telegram: polling stopped at offset {}", self.cursor);
                    return Ok(());
                }
                result = self.fetch() => result,
            };

            let batch = match fetched {
                Ok(batch) => batch,
                Err(e) if is_fatal(&e) => {
                    error!("telegram: polling aborted: {e}");
                    return Err(e);
                }
                Err(e) => {
                    let delay = e.retry_after().unwrap_or(backoff_secs);
                    error!("telegram poll error (retry in {delay}s): {e}");
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            info!("telegram: polling stopped at offset {}", self.cursor);
                            return Ok(());
                        }
                        _ = tokio::time::sleep(Duration::from_secs(delay)) => {}
                    }
                    backoff_secs = (backoff_secs * 2).min(self.settings.max_backoff_secs.max(1));
                    continue;
                }
            };

            // Successful poll -- reset backoff.
            backoff_secs = 1;

            let next = next_cursor(self.cursor, &batch);
            for update in batch {
                if tx.send(update).await.is_err() {
                    info!("telegram: update receiver dropped, stopping poller");
                    return Ok(());
                }
            }
            if next != self.cursor {
                debug!("telegram: offset {} -> {next}", self.cursor);
            }
            self.cursor = next;
        }
    }

    /// One `getUpdates` call at the current cursor, minus anything already
    /// delivered.
    async fn fetch(&self) -> Result<Vec<Update>, PigeonError> {
        let request = GetUpdates {
            offset: self.cursor,
            limit: self.settings.limit,
            timeout: self.settings.timeout_secs,
            allowed_updates: self.settings.allowed_updates.clone(),
        };
        let mut batch = self.api.get_updates(&request).await?;

        let before = batch.len();
        batch.retain(|u| u.id >= self.cursor);
        if batch.len() < before {
            warn!(
                "telegram: dropped {} update(s) below offset {}",
                before - batch.len(),
                self.cursor
            );
        }
        Ok(batch)
    }
}

/// One past the highest id in `batch`, never below `cursor`.
fn next_cursor(cursor: i64, batch: &[Update]) -> i64 {
    batch
        .iter()
        .map(|u| u.id + 1)
        .max()
        .map_or(cursor, |next| next.max(cursor))
}

fn is_fatal(e: &PigeonError) -> bool {
    e.is_unauthorized() || e.is_required() || e.is_validation()
}
