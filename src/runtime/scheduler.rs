/// Background trigger scheduler
///
/// Re-invokes workflow triggers on cron schedules using tokio-cron-scheduler.
/// The scheduler is an explicitly owned object: created during application
/// setup, started in the background, and shut down on server exit. Jobs are
/// keyed by workflow id; registering the same workflow id again replaces the
/// previous schedule.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::execution::EngineKind;
use crate::sources::ExecutionSource;

/// Cron-driven re-invocation of workflow triggers
pub struct TriggerScheduler {
    scheduler: Arc<RwLock<JobScheduler>>,
    /// Workflow id -> scheduler job UUID, tracked for replacement and removal
    job_ids: Arc<RwLock<HashMap<String, Uuid>>>,
    sources: HashMap<EngineKind, Arc<dyn ExecutionSource>>,
}

impl TriggerScheduler {
    /// Create a scheduler over the registered sources
    pub async fn new(sources: &[Arc<dyn ExecutionSource>]) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        let sources = sources
            .iter()
            .map(|source| (source.engine(), Arc::clone(source)))
            .collect();

        Ok(Self {
            scheduler: Arc::new(RwLock::new(scheduler)),
            job_ids: Arc::new(RwLock::new(HashMap::new())),
            sources,
        })
    }

    /// Start executing registered schedules in the background
    pub async fn start(&self) -> Result<()> {
        tracing::info!("⏰ Starting trigger scheduler");
        {
            let scheduler = self.scheduler.read().await;
            scheduler.start().await?;
        }
        tracing::info!("✅ Trigger scheduler started");
        Ok(())
    }

    /// Stop the scheduler and drop all tracked jobs
    pub async fn stop(&self) -> Result<()> {
        tracing::info!("⏹️ Stopping trigger scheduler");
        {
            let mut job_ids = self.job_ids.write().await;
            job_ids.clear();
        }
        {
            let mut scheduler = self.scheduler.write().await;
            scheduler.shutdown().await?;
        }
        tracing::info!("✅ Trigger scheduler stopped");
        Ok(())
    }

    /// Register (or replace) a cron re-invocation for a workflow
    ///
    /// A second registration for the same workflow id removes the previous
    /// job before adding the new one. Returns the scheduler's job UUID.
    pub async fn register(
        &self,
        workflow_id: &str,
        engine: EngineKind,
        schedule: &str,
    ) -> Result<Uuid> {
        let source = self
            .sources
            .get(&engine)
            .ok_or_else(|| anyhow::anyhow!("no source registered for engine '{}'", engine))?;

        tracing::info!(
            "⏰ Registering schedule for workflow {} on {}: {}",
            workflow_id,
            engine,
            schedule
        );

        // Replace semantics: drop the previous job for this workflow first.
        {
            let mut job_ids = self.job_ids.write().await;
            if let Some(old_job_id) = job_ids.remove(workflow_id) {
                let scheduler = self.scheduler.read().await;
                if let Err(error) = scheduler.remove(&old_job_id).await {
                    tracing::warn!(
                        "⚠️ Failed to remove previous job for workflow {}: {}",
                        workflow_id,
                        error
                    );
                } else {
                    tracing::debug!("🛑 Removed previous schedule for workflow: {}", workflow_id);
                }
            }
        }

        let workflow_id_owned = workflow_id.to_string();
        let source = Arc::clone(source);

        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let workflow_id = workflow_id_owned.clone();
            let source = Arc::clone(&source);

            Box::pin(async move {
                tracing::info!("🔔 Schedule fired for workflow: {}", workflow_id);
                match source.trigger_workflow(&workflow_id).await {
                    Ok(_) => {
                        tracing::info!("✅ Scheduled trigger completed for workflow: {}", workflow_id)
                    }
                    Err(error) => tracing::error!(
                        "❌ Scheduled trigger failed for workflow {}: {}",
                        workflow_id,
                        error
                    ),
                }
            })
        })?;

        let new_job_id = {
            let scheduler = self.scheduler.write().await;
            scheduler.add(job).await?
        };

        {
            let mut job_ids = self.job_ids.write().await;
            job_ids.insert(workflow_id.to_string(), new_job_id);
        }

        tracing::info!("✅ Schedule registered for workflow: {}", workflow_id);
        Ok(new_job_id)
    }

    /// Cancel a workflow's schedule; returns whether one existed
    pub async fn cancel(&self, workflow_id: &str) -> bool {
        let removed = {
            let mut job_ids = self.job_ids.write().await;
            job_ids.remove(workflow_id)
        };

        match removed {
            Some(job_id) => {
                let scheduler = self.scheduler.read().await;
                if let Err(error) = scheduler.remove(&job_id).await {
                    tracing::warn!(
                        "⚠️ Failed to remove job for workflow {}: {}",
                        workflow_id,
                        error
                    );
                } else {
                    tracing::info!("🗑️ Cancelled schedule for workflow: {}", workflow_id);
                }
                true
            }
            None => false,
        }
    }

    /// Number of tracked schedules
    pub async fn schedule_count(&self) -> usize {
        self.job_ids.read().await.len()
    }
}
