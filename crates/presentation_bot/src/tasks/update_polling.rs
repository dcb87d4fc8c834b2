//! Update polling background task
//!
//! Long-polls the Bot API for incoming updates and runs each one through
//! the update handlers. Processed updates are acknowledged by passing the
//! highest seen `update_id` plus one as the next poll's offset.

use std::sync::Arc;
use std::time::Duration;

use application::IntakeService;
use integration_telegram::TelegramClient;
use tracing::{debug, info, warn};

use crate::handlers::handle_update;

/// Spawn a background task that long-polls Telegram for new updates.
///
/// Each iteration fetches one batch and handles the updates in order, so a
/// slow pipeline run delays later updates rather than racing them. A failed
/// poll backs off for `error_backoff` before the next attempt.
///
/// Returns a `JoinHandle` that can be used to abort the task on shutdown.
pub fn spawn_update_polling_task(
    client: Arc<TelegramClient>,
    intake: Arc<IntakeService>,
    poll_timeout_secs: u64,
    error_backoff: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        poll_timeout_secs,
        backoff_secs = error_backoff.as_secs(),
        "Starting update polling background task"
    );

    tokio::spawn(async move {
        let mut offset: Option<i64> = None;
        loop {
            offset = poll_and_process(&client, &intake, offset, poll_timeout_secs, error_backoff)
                .await;
        }
    })
}

/// Single poll iteration: fetch a batch and handle each update in order.
///
/// Returns the acknowledgement offset to use for the next poll.
async fn poll_and_process(
    client: &TelegramClient,
    intake: &IntakeService,
    offset: Option<i64>,
    poll_timeout_secs: u64,
    error_backoff: Duration,
) -> Option<i64> {
    let updates = match client.get_updates(offset, poll_timeout_secs).await {
        Ok(updates) => updates,
        Err(e) => {
            warn!(
                error = %e,
                backoff_secs = error_backoff.as_secs(),
                "Update poll failed, backing off"
            );
            tokio::time::sleep(error_backoff).await;
            return offset;
        },
    };

    if updates.is_empty() {
        return offset;
    }

    debug!(count = updates.len(), "Update poll: processing batch");

    let mut next_offset = offset;
    for update in updates {
        // Acknowledge before handling; a failed pipeline run must not make
        // the same update redeliver forever.
        next_offset = advance_offset(next_offset, update.update_id);
        handle_update(client, intake, update).await;
    }
    next_offset
}

/// Fold one `update_id` into the acknowledgement offset.
fn advance_offset(offset: Option<i64>, update_id: i64) -> Option<i64> {
    let acknowledged = update_id + 1;
    Some(offset.map_or(acknowledged, |current| current.max(acknowledged)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_offset_starts_past_the_first_update() {
        assert_eq!(advance_offset(None, 725), Some(726));
    }

    #[test]
    fn advance_offset_keeps_the_highest_acknowledgement() {
        assert_eq!(advance_offset(Some(726), 725), Some(726));
        assert_eq!(advance_offset(Some(726), 730), Some(731));
    }
}
