//! Cron-derived cadence for the signal cycle.

use cron::Schedule;
use std::str::FromStr;
use tracing::info;

/// Converts a poll interval into a cron schedule and sleeps to the next
/// occurrence. The caller awaits each cycle before asking for the next
/// tick, so cycles cannot overlap; ticks that would land inside a running
/// cycle are simply not observed.
pub struct CycleScheduler {
    schedule: Schedule,
}

impl CycleScheduler {
    /// Create a scheduler firing every `interval_seconds`.
    ///
    /// Cron format: second minute hour day month weekday.
    pub fn new(interval_seconds: u64) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if interval_seconds == 0 {
            return Err("scheduler interval must be > 0 seconds".into());
        }

        let cron_expr = if interval_seconds >= 60 {
            let minutes = interval_seconds / 60;
            format!("0 */{} * * * *", minutes)
        } else {
            format!("*/{} * * * * *", interval_seconds)
        };

        let schedule = Schedule::from_str(&cron_expr)
            .map_err(|e| format!("invalid cron expression '{}': {}", cron_expr, e))?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "Scheduler created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self { schedule })
    }

    /// Sleep until the next scheduled occurrence.
    pub async fn wait_next_tick(&self) {
        let mut upcoming = self.schedule.upcoming(chrono::Utc);
        if let Some(next_tick) = upcoming.next() {
            let now = chrono::Utc::now();
            if next_tick > now {
                let duration = (next_tick - now).to_std().unwrap_or_default();
                tokio::time::sleep(duration).await;
            }
        } else {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        }
    }
}
