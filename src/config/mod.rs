//! Builds the `AppConfig` from layered sources:
//! `config/base.toml`, then `config/{environment}.toml`, then `APP_`-prefixed env variables
//! (`__` separates the section from the key, e.g. `APP_NET_CONFIG__APP_PORT=9000`).
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod types;

use std::{path::Path, sync::OnceLock};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{
    AnalyticsConfig, AppConfig, Environment, NetConfig, NewsletterConfig, PodcastConfig,
};

/// Reads `APP_ENVIRONMENT`, defaulting to `local`.
pub fn environment() -> ConfigResult<Environment> {
    std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
}

/// Builds a fresh `AppConfig` from the `config` directory in the current working directory.
pub fn load_config() -> ConfigResult<AppConfig> {
    let config_dir = std::env::current_dir()?.join("config");
    let environment = environment()?;

    info!(
        "{:<20} - Loading the '{}' configuration",
        "load_config",
        environment.as_ref()
    );

    let config = layered(&config_dir, environment, ENV_PREFIX).extract()?;
    Ok(config)
}

const ENV_PREFIX: &str = "APP_";

fn layered(config_dir: &Path, environment: Environment, env_prefix: &str) -> Figment {
    let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

    Figment::new()
        .merge(Toml::file(config_dir.join("base.toml")))
        .merge(Toml::file(config_dir.join(environment_filename)))
        .merge(Env::prefixed(env_prefix).split("__"))
}

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        load_config().unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"))
    })
}
