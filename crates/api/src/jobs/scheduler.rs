//! Periodic background task scheduler.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How often a job runs.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // Hourly is available for future jobs
pub enum JobFrequency {
    Seconds(u64),
    Minutes(u64),
    Hourly,
}

impl JobFrequency {
    pub fn period(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Minutes(mins) => Duration::from_secs(*mins * 60),
            JobFrequency::Hourly => Duration::from_secs(3600),
        }
    }
}

/// A periodic background task.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Job name for logging.
    fn name(&self) -> &'static str;

    fn frequency(&self) -> JobFrequency;

    /// One run of the job. Failures are logged and the schedule continues.
    async fn execute(&self) -> Result<(), String>;
}

/// Runs registered jobs on their intervals until shutdown is signaled.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one task per registered job.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting job scheduler");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let shutdown_rx = self.shutdown_rx.clone();
            self.handles.push(tokio::spawn(run_job(job, shutdown_rx)));
        }
    }

    /// Signal shutdown without waiting for running jobs.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for job tasks to finish, up to the timeout.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Job task panicked");
                }
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => info!("All jobs stopped"),
            Err(_) => warn!(?timeout, "Job shutdown timed out"),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job(job: Arc<dyn Job>, mut shutdown_rx: watch::Receiver<bool>) {
    let name = job.name();
    let mut interval = tokio::time::interval(job.frequency().period());

    // The first tick fires immediately; jobs wait a full period instead.
    interval.tick().await;

    info!(job = name, frequency = ?job.frequency(), "Job scheduled");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let start = std::time::Instant::now();
                match job.execute().await {
                    Ok(()) => info!(
                        job = name,
                        elapsed_ms = start.elapsed().as_millis(),
                        "Job run completed"
                    ),
                    Err(e) => error!(
                        job = name,
                        elapsed_ms = start.elapsed().as_millis(),
                        error = %e,
                        "Job run failed"
                    ),
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!(job = name, "Job stopping");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingJob {
        runs: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn frequency(&self) -> JobFrequency {
            JobFrequency::Seconds(1)
        }

        async fn execute(&self) -> Result<(), String> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_frequency_periods() {
        assert_eq!(JobFrequency::Seconds(30).period(), Duration::from_secs(30));
        assert_eq!(JobFrequency::Minutes(14).period(), Duration::from_secs(840));
        assert_eq!(JobFrequency::Hourly.period(), Duration::from_secs(3600));
    }

    #[test]
    fn test_register() {
        let mut scheduler = JobScheduler::new();
        assert!(scheduler.jobs.is_empty());
        scheduler.register(CountingJob {
            runs: Arc::new(AtomicUsize::new(0)),
        });
        assert_eq!(scheduler.jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_before_first_tick() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: Arc::clone(&runs),
        });
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(2)).await;

        // First tick is skipped, so nothing ran before shutdown
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
