use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::Generator;

#[derive(Debug, Default, Clone)]
pub struct Schedules {
    /// Cron expression (with seconds) for the expiry sweep.
    pub sweep: Option<String>,
    /// Cron expression (with seconds) for the weekly summary.
    pub weekly_summary: Option<String>,
}

/// Builds a scheduler with one job per configured schedule. Nothing is
/// started; the caller decides when to call `start`.
pub async fn scheduler(
    generator: &Generator,
    schedules: &Schedules,
) -> Result<JobScheduler, JobSchedulerError> {
    let sched = JobScheduler::new().await?;

    if let Some(schedule) = schedules.sweep.as_deref() {
        let generator = generator.clone();

        sched
            .add(Job::new_async(schedule, move |uuid, mut l| {
                let generator = generator.clone();

                Box::pin(async move {
                    if let Err(err) = generator.sweep(generator.today()).await {
                        tracing::error!(err = %err, "failed to sweep expiring ingredients");
                    }

                    if let Err(err) = l.next_tick_for_job(uuid).await {
                        tracing::error!(err = %err, "failed to get next tick for expiry sweep");
                    }
                })
            })?)
            .await?;

        tracing::info!(schedule, "expiry sweep scheduled");
    }

    if let Some(schedule) = schedules.weekly_summary.as_deref() {
        let generator = generator.clone();

        sched
            .add(Job::new_async(schedule, move |uuid, mut l| {
                let generator = generator.clone();

                Box::pin(async move {
                    if let Err(err) = generator.sweep_weekly(generator.today()).await {
                        tracing::error!(err = %err, "failed to create weekly summaries");
                    }

                    if let Err(err) = l.next_tick_for_job(uuid).await {
                        tracing::error!(err = %err, "failed to get next tick for weekly summary");
                    }
                })
            })?)
            .await?;

        tracing::info!(schedule, "weekly summary scheduled");
    }

    Ok(sched)
}
