//! Cleanup service: periodic sweep of expired files and channels.
//!
//! DESIGN
//! ======
//! Expired files go first (disk body, then row), then every expired channel
//! is purged with whatever files it still holds. The dashboard and the
//! `cleanup` endpoint run the same sweep on demand; a background task runs it
//! every `CLEANUP_INTERVAL_SECS`.

#[cfg(test)]
#[path = "cleanup_test.rs"]
mod cleanup_test;

use std::path::Path;
use std::time::Duration;

use sqlx::{PgPool, Row};
use tokio::task::JoinHandle;
use tracing::error;

use super::expiry::now_ts;
use super::{channel, files};
use crate::state::AppState;

/// What one sweep removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub files: usize,
    pub channels: usize,
}

impl SweepReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files == 0 && self.channels == 0
    }
}

/// Remove everything whose expiry has passed.
///
/// # Errors
///
/// Returns a database error if a query fails. Disk errors are ignored.
pub async fn sweep(pool: &PgPool, upload_dir: &Path) -> Result<SweepReport, sqlx::Error> {
    let now = now_ts();
    let mut report = SweepReport::default();

    let expired_files =
        sqlx::query("DELETE FROM files WHERE expire_at IS NOT NULL AND expire_at > 0 AND expire_at < $1 RETURNING stored_name")
            .bind(now)
            .fetch_all(pool)
            .await?;
    for row in &expired_files {
        files::remove_stored(upload_dir, &row.get::<String, _>("stored_name")).await;
    }
    report.files = expired_files.len();

    let expired_channels: Vec<String> =
        sqlx::query("SELECT name FROM channels WHERE expire_at IS NOT NULL AND expire_at > 0 AND expire_at < $1")
            .bind(now)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|r| r.get("name"))
            .collect();
    for name in &expired_channels {
        channel::purge_channel(pool, upload_dir, name).await?;
    }
    report.channels = expired_channels.len();

    Ok(report)
}

/// Spawn the background sweep. Returns `None` when the interval is `0`.
pub fn spawn_cleanup_task(state: AppState) -> Option<JoinHandle<()>> {
    let secs = state.config.cleanup_interval_secs;
    if secs == 0 {
        tracing::info!("background cleanup disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(secs));
        loop {
            interval.tick().await;
            match sweep(&state.pool, state.upload_dir()).await {
                Ok(report) if !report.is_empty() => {
                    tracing::info!(files = report.files, channels = report.channels, "expired data swept");
                }
                Ok(_) => {}
                Err(e) => error!(error = %e, "cleanup sweep failed"),
            }
        }
    }))
}
