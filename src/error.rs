use crate::{analytics, config, newsletter, podcast, utils::error_chain_fmt, web};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("web error: {0}")]
    Web(#[from] web::Error),
    #[error("newsletter client error: {0}")]
    Newsletter(#[from] newsletter::client::Error),
    #[error("analytics error: {0}")]
    Analytics(#[from] analytics::Error),
    #[error("podcast feed error: {0}")]
    Podcast(#[from] podcast::Error),

    #[error("tokio joining error: {0}")]
    TokioJoin(#[from] tokio::task::JoinError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
