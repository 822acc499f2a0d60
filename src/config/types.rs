//! The configuration structs used to build the AppConfig, and their impls.
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::ConfigError;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub newsletter_config: NewsletterConfig,
    pub analytics_config: AnalyticsConfig,
    pub podcast_config: PodcastConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
    pub base_url: String,
}

/// Where the subscription form posts to. `api/newsletter` is joined onto `base_url`.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewsletterConfig {
    pub base_url: String,
    pub timeout_millis: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Goal events are skipped when no site id is set.
    #[serde(default)]
    pub fathom_site_id: Option<String>,
    pub goal_id: String,
    pub endpoint: String,
    pub timeout_millis: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PodcastConfig {
    pub feed_url: String,
    pub timeout_millis: u64,
}

// ###################################
// ->   IMPLs
// ###################################
impl NewsletterConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl AnalyticsConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl PodcastConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl NetConfig {
    /// The host part of `base_url`, reported with analytics events.
    pub fn hostname(&self) -> String {
        reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.base_url.clone())
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
