//! Epoch scheduler
//!
//! Background task that wakes at each weekly boundary and processes it.
//! Sleeps are capped by a poll interval so a drifting wall clock or a
//! failed run is retried without waiting a whole week.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::app::league_service::{EpochReport, LeagueService};
use crate::domain::ports::{EpochRepository, ParticipantRepository};
use crate::error::AppError;

pub struct EpochScheduler<PR, ER>
where
    PR: ParticipantRepository + ?Sized,
    ER: EpochRepository + ?Sized,
{
    service: Arc<LeagueService<PR, ER>>,
    epochs: Arc<ER>,
    poll_interval: Duration,
}

impl<PR, ER> EpochScheduler<PR, ER>
where
    PR: ParticipantRepository + ?Sized,
    ER: EpochRepository + ?Sized,
{
    pub fn new(service: Arc<LeagueService<PR, ER>>, epochs: Arc<ER>, poll_interval: Duration) -> Self {
        Self {
            service,
            epochs,
            poll_interval,
        }
    }

    /// Decide where epoch history starts and finish any boundary left over
    /// from before a restart.
    ///
    /// Without history the current epoch becomes the baseline; transitioning
    /// the previous boundary would reset points earned since it.
    pub async fn catch_up(&self) -> Result<DateTime<Utc>, AppError> {
        let now = self.service.now();
        let boundary = self.service.epoch_clock().previous_boundary(now);

        match self.epochs.latest_processed_boundary().await? {
            None => {
                tracing::info!(baseline = %boundary, "No epoch history, starting from current epoch");
                Ok(boundary)
            }
            Some(last) => {
                // Re-running a processed boundary is a no-op, so this also
                // completes leagues a crashed run never reached
                self.service.process_epoch(boundary).await?;
                if boundary > last {
                    tracing::info!(missed = %last, processed = %boundary, "Caught up on missed epoch");
                }
                Ok(boundary)
            }
        }
    }

    /// Process the latest boundary if one was crossed since `last_boundary`
    pub async fn tick(
        &self,
        last_boundary: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, Option<EpochReport>), AppError> {
        let now = self.service.now();
        let epoch_clock = self.service.epoch_clock();
        if !epoch_clock.has_crossed_boundary(now, last_boundary) {
            return Ok((last_boundary, None));
        }

        let boundary = epoch_clock.previous_boundary(now);
        let report = self.service.process_epoch(boundary).await?;
        Ok((boundary, Some(report)))
    }

    /// How long to sleep before the next tick
    pub fn next_wait(&self) -> Duration {
        let now = self.service.now();
        self.service
            .epoch_clock()
            .time_until_boundary(now)
            .to_std()
            .unwrap_or_default()
            .min(self.poll_interval)
    }

    /// Run forever; errors are logged and retried on the next poll
    pub async fn run(self) {
        tracing::info!(
            utc_offset = %self.service.epoch_clock().offset(),
            poll_secs = self.poll_interval.as_secs(),
            "Epoch scheduler started"
        );

        let mut last_boundary = loop {
            match self.catch_up().await {
                Ok(boundary) => break boundary,
                Err(e) => {
                    tracing::error!(error = %e, "Epoch catch-up failed, retrying");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        };

        loop {
            let wait = self.next_wait();
            tracing::debug!(wait_secs = wait.as_secs(), "Epoch scheduler sleeping");
            tokio::time::sleep(wait).await;

            match self.tick(last_boundary).await {
                Ok((boundary, report)) => {
                    if let Some(report) = report {
                        tracing::info!(
                            epoch_end = %report.epoch_end,
                            processed = report.processed.len(),
                            "Scheduled epoch transition complete"
                        );
                    }
                    last_boundary = boundary;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Scheduled epoch transition failed");
                }
            }
        }
    }
}
