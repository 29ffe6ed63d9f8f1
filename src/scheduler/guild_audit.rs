use std::{sync::Arc, time::Duration};

use dioxus_logger::tracing;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, host::GuildHost, manager::GuildManager, policy::GuildPolicy};

/// Starts the periodic guild audit
///
/// Runs `GuildManager::audit` every `frequency`, starting one interval after
/// this call. The returned scheduler keeps running until shut down.
///
/// # Arguments
/// - `manager`: Guild manager to audit with
/// - `host`: Bot framework capabilities the audit reads and acts through
/// - `frequency`: Time between audits
pub async fn start_scheduler<P: GuildPolicy + 'static>(
    manager: Arc<GuildManager<P>>,
    host: Arc<dyn GuildHost>,
    frequency: Duration,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(frequency, move |_uuid, _lock| {
        let manager = manager.clone();
        let host = host.clone();

        Box::pin(async move {
            let report = manager.audit(host.as_ref()).await;

            for (guild_id, e) in &report.failed {
                tracing::error!("Audit could not leave guild {}: {}", guild_id, e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Guild audit scheduler started (every {}s)",
        frequency.as_secs()
    );

    Ok(scheduler)
}

/// Shared slot for the running audit scheduler.
///
/// The event handler starts the audit through its copy of the handle on the
/// first `ready` event; the embedding application keeps another copy to stop
/// it. Clones share the same slot.
#[derive(Clone, Default)]
pub struct AuditHandle {
    scheduler: Arc<Mutex<Option<JobScheduler>>>,
}

impl AuditHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the periodic audit unless it is already running.
    ///
    /// # Returns
    /// - `Ok(true)` - The audit was started
    /// - `Ok(false)` - An audit was already running; nothing changed
    /// - `Err(AppError)` - The scheduler could not be started
    pub async fn start<P: GuildPolicy + 'static>(
        &self,
        manager: Arc<GuildManager<P>>,
        host: Arc<dyn GuildHost>,
        frequency: Duration,
    ) -> Result<bool, AppError> {
        let mut slot = self.scheduler.lock().await;
        if slot.is_some() {
            return Ok(false);
        }

        *slot = Some(start_scheduler(manager, host, frequency).await?);

        Ok(true)
    }

    /// Stops the periodic audit if it is running.
    ///
    /// Returns whether an audit was running.
    pub async fn stop(&self) -> Result<bool, AppError> {
        let Some(mut scheduler) = self.scheduler.lock().await.take() else {
            return Ok(false);
        };

        scheduler.shutdown().await?;
        tracing::info!("Guild audit scheduler stopped");

        Ok(true)
    }

    pub async fn is_running(&self) -> bool {
        self.scheduler.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ManagerConfig,
        host::mock::{snapshot, EventLog, MockHost},
        policy::DefaultPolicy,
    };

    #[tokio::test(flavor = "multi_thread")]
    async fn test_scheduler_runs_audit() {
        let log = EventLog::default();
        let host = Arc::new(MockHost::new(&log).with_guilds(vec![
            snapshot(1, 20, 0),
            snapshot(2, 1, 9),
        ]));
        let config = ManagerConfig::default().with_min_members(10);
        let manager = Arc::new(GuildManager::new(config, DefaultPolicy).unwrap());

        let mut scheduler = start_scheduler(manager, host.clone(), Duration::from_secs(1))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        scheduler.shutdown().await.unwrap();

        let left = host.left();
        assert!(!left.is_empty());
        assert!(left.iter().all(|id| *id == 2));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_audit_handle_starts_once_and_stops() {
        let log = EventLog::default();
        let host = Arc::new(MockHost::new(&log).with_guilds(vec![snapshot(1, 20, 0)]));
        let manager = Arc::new(GuildManager::new(ManagerConfig::default(), DefaultPolicy).unwrap());
        let handle = AuditHandle::new();
        let embedder_copy = handle.clone();

        assert!(!handle.is_running().await);

        let started = handle
            .start(manager.clone(), host.clone(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(started);
        assert!(embedder_copy.is_running().await);

        let started_again = handle
            .start(manager, host, Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!started_again);

        assert!(embedder_copy.stop().await.unwrap());
        assert!(!handle.is_running().await);
        assert!(!embedder_copy.stop().await.unwrap());
    }
}
