//! Conversion goal tracking.
//!
//! Goal events are best effort: they run detached from the request that triggered them
//! and their failures are only logged.

use reqwest::Client;
use tracing::{debug, warn, Instrument};

use crate::config::AnalyticsConfig;

/// Records that a named conversion goal was reached.
pub trait GoalTracker {
    /// Must return immediately and must never fail the caller.
    fn track_goal(&self, goal_id: &str);
}

/// Sends goal events to Fathom Analytics.
#[derive(Debug, Clone)]
pub struct FathomTracker {
    http_client: Client,
    endpoint: reqwest::Url,
    site_id: Option<String>,
    hostname: String,
}

impl FathomTracker {
    pub fn new(config: &AnalyticsConfig, hostname: impl Into<String>) -> Result<Self> {
        let endpoint = reqwest::Url::parse(&config.endpoint)
            .map_err(|e| Error::UrlParsing(e.to_string()))?;
        let http_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(FathomTracker {
            http_client,
            endpoint,
            site_id: config.fathom_site_id.clone(),
            hostname: hostname.into(),
        })
    }
}

impl GoalTracker for FathomTracker {
    fn track_goal(&self, goal_id: &str) {
        let Some(site_id) = self.site_id.clone() else {
            debug!(goal_id, "No Fathom site id configured, skipping goal event");
            return;
        };

        let request = self.http_client.get(self.endpoint.clone()).query(&[
            ("sid", site_id.as_str()),
            ("gid", goal_id),
            ("h", self.hostname.as_str()),
            ("p", "/"),
        ]);

        let span = tracing::info_span!("fathom_goal", goal_id);
        tokio::spawn(
            async move {
                match request.send().await.and_then(|r| r.error_for_status()) {
                    Ok(_) => debug!("goal event recorded"),
                    Err(e) => warn!(error = %e, "failed to record goal event"),
                }
            }
            .instrument(span),
        );
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse the analytics endpoint: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
