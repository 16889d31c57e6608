//! Self-ping to keep free-tier hosting from idling the instance.

use std::time::Duration;

use super::scheduler::{Job, JobFrequency};

/// Pings the service's own health endpoint on a fixed schedule.
///
/// Free hosting tiers spin instances down after 15 minutes without traffic,
/// so the interval stays just under that.
pub struct KeepAliveJob {
    client: reqwest::Client,
    health_url: String,
}

impl KeepAliveJob {
    pub fn new(public_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let health_url = format!("{}/api/health", public_url.trim_end_matches('/'));
        Ok(Self { client, health_url })
    }
}

#[async_trait::async_trait]
impl Job for KeepAliveJob {
    fn name(&self) -> &'static str {
        "keep_alive"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(14)
    }

    async fn execute(&self) -> Result<(), String> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| format!("Keep-alive ping failed: {}", e))?;

        if response.status().is_success() {
            tracing::debug!(url = %self.health_url, "Keep-alive ping ok");
            Ok(())
        } else {
            Err(format!(
                "Keep-alive ping returned {}",
                response.status()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_url_built_from_public_url() {
        let job = KeepAliveJob::new("https://kb.example.com/".to_string()).unwrap();
        assert_eq!(job.health_url, "https://kb.example.com/api/health");
    }

    #[test]
    fn test_ping_interval_under_idle_cutoff() {
        let job = KeepAliveJob::new("https://kb.example.com".to_string()).unwrap();
        assert!(job.frequency().period() < Duration::from_secs(15 * 60));
    }
}
