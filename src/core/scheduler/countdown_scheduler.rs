// Per-guild daily jobs.
//
// Each configured guild gets one cron job on a shared `JobScheduler`, firing
// at the guild's post time (UTC). Jobs are never edited in place: changing a
// guild's time removes its job and adds a fresh one.
//
// The scheduler spawns every run, so removing a job while a delivery is in
// flight stops future posts but lets that one finish.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use uuid::Uuid;

use crate::core::guild_config::ServerConfig;
use crate::core::time::{has_passed, next_occurrence, parse_time, TimeFormatError, TimeOfDay};

/// What a job should do after a fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobControl {
    Continue,
    /// Nothing left to post for this guild; end the job.
    Stop,
}

#[async_trait]
pub trait CountdownTrigger: Send + Sync + 'static {
    async fn fire(&self, guild_id: u64) -> JobControl;
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    InvalidTime(#[from] TimeFormatError),
    #[error("job scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),
}

struct ScheduledJob {
    time: TimeOfDay,
    job_id: Uuid,
}

type JobTable = Arc<Mutex<HashMap<u64, ScheduledJob>>>;

pub struct CountdownScheduler {
    trigger: Arc<dyn CountdownTrigger>,
    cron: JobScheduler,
    jobs: JobTable,
}

impl CountdownScheduler {
    /// Start an empty scheduler. Jobs are added per guild later.
    pub async fn new(trigger: Arc<dyn CountdownTrigger>) -> Result<Self, JobSchedulerError> {
        let cron = JobScheduler::new().await?;
        cron.start().await?;
        tracing::info!("Countdown scheduler started");

        Ok(Self {
            trigger,
            cron,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Create a job for every guild with a channel bound. Returns how many
    /// were scheduled; zero once the release has passed.
    pub async fn schedule_all(
        &self,
        configs: &HashMap<u64, ServerConfig>,
        release_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> usize {
        if has_passed(release_date, now) {
            tracing::info!(%release_date, "Release date has passed, not scheduling countdown jobs");
            return 0;
        }

        let mut scheduled = 0;
        for (guild_id, config) in configs {
            if !config.is_configured() {
                continue;
            }
            match self.schedule_guild(*guild_id, &config.post_time).await {
                Ok(_) => scheduled += 1,
                Err(e) => {
                    tracing::error!(guild_id, post_time = %config.post_time, error = %e, "Could not schedule guild")
                }
            }
        }

        tracing::info!(scheduled, "Countdown jobs scheduled");
        scheduled
    }

    /// Destroy any job for the guild, then create one at `post_time`.
    ///
    /// A malformed time leaves the existing job untouched.
    pub async fn schedule_guild(
        &self,
        guild_id: u64,
        post_time: &str,
    ) -> Result<TimeOfDay, ScheduleError> {
        let time = parse_time(post_time)?;
        let cron = time.to_cron();
        self.add_job(guild_id, time, &cron).await?;

        tracing::info!(
            guild_id,
            time = %time,
            cron = %cron,
            next = %next_occurrence(time, Utc::now()),
            "Scheduled countdown job (UTC)"
        );
        Ok(time)
    }

    /// Move a guild's job to a new time, effective immediately.
    pub async fn reschedule(
        &self,
        guild_id: u64,
        new_time: &str,
    ) -> Result<TimeOfDay, ScheduleError> {
        let time = self.schedule_guild(guild_id, new_time).await?;
        tracing::info!(guild_id, time = %time, "Rescheduled countdown job");
        Ok(time)
    }

    pub async fn unschedule(&self, guild_id: u64) -> bool {
        let Some(job) = self.jobs.lock().await.remove(&guild_id) else {
            return false;
        };
        if let Err(e) = self.cron.remove(&job.job_id).await {
            tracing::warn!(guild_id, error = %e, "Could not remove countdown job");
        }
        tracing::info!(guild_id, "Unscheduled countdown job");
        true
    }

    /// Remove every job and shut the scheduler down.
    pub async fn stop_all(&self) -> usize {
        let drained: Vec<(u64, ScheduledJob)> = self.jobs.lock().await.drain().collect();
        let stopped = drained.len();
        for (guild_id, job) in drained {
            if let Err(e) = self.cron.remove(&job.job_id).await {
                tracing::warn!(guild_id, error = %e, "Could not remove countdown job");
            }
        }

        let mut cron = self.cron.clone();
        if let Err(e) = cron.shutdown().await {
            tracing::warn!(error = %e, "Job scheduler did not shut down cleanly");
        }

        tracing::info!(stopped, "Stopped all countdown jobs");
        stopped
    }

    /// Post time of the guild's live job, if it has one.
    pub async fn scheduled_time(&self, guild_id: u64) -> Option<TimeOfDay> {
        self.jobs.lock().await.get(&guild_id).map(|job| job.time)
    }

    pub async fn active_jobs(&self) -> usize {
        self.jobs.lock().await.len()
    }

    async fn add_job(
        &self,
        guild_id: u64,
        time: TimeOfDay,
        cron: &str,
    ) -> Result<(), JobSchedulerError> {
        let job = countdown_job(cron, Arc::clone(&self.trigger), Arc::clone(&self.jobs), guild_id)?;

        // Held across remove + add so a concurrent reschedule can't leave two jobs.
        let mut jobs = self.jobs.lock().await;
        if let Some(old) = jobs.remove(&guild_id) {
            if let Err(e) = self.cron.remove(&old.job_id).await {
                tracing::warn!(guild_id, error = %e, "Could not remove existing job");
            }
            tracing::debug!(guild_id, old_time = %old.time, "Destroyed existing job");
        }

        let job_id = self.cron.add(job).await?;
        jobs.insert(guild_id, ScheduledJob { time, job_id });
        Ok(())
    }
}

fn countdown_job(
    cron: &str,
    trigger: Arc<dyn CountdownTrigger>,
    jobs: JobTable,
    guild_id: u64,
) -> Result<Job, JobSchedulerError> {
    Job::new_async(cron, move |job_id, scheduler| {
        let trigger = Arc::clone(&trigger);
        let jobs = Arc::clone(&jobs);

        Box::pin(async move {
            if trigger.fire(guild_id).await == JobControl::Continue {
                return;
            }

            // Only drop the entry if it still points at this job; a
            // reschedule may already have replaced it.
            {
                let mut jobs = jobs.lock().await;
                if jobs.get(&guild_id).is_some_and(|job| job.job_id == job_id) {
                    jobs.remove(&guild_id);
                }
            }
            if let Err(e) = scheduler.remove(&job_id).await {
                tracing::warn!(guild_id, error = %e, "Could not remove finished countdown job");
            }
            tracing::info!(guild_id, "Countdown job finished");
        })
    })
}
