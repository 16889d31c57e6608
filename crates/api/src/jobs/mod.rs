//! Background jobs.

pub mod keep_alive;
pub mod pool_metrics;
pub mod scheduler;

pub use keep_alive::KeepAliveJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
