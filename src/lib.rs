//! Server-rendered site for APIs You Won't Hate.
//!
//! Pages share a footer with a newsletter signup form. Signups are forwarded to the
//! newsletter API and a successful one is reported to Fathom as a conversion goal.

pub mod analytics;
pub mod app;
pub mod config;
mod error;
pub mod footer;
pub mod newsletter;
pub mod podcast;
pub mod templ_manager;
mod utils;
pub mod web;

// re-exports
pub use app::{App, AppState};
pub use error::{Error, Result};

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Human readable console output. Honours `RUST_LOG`, defaults to `debug`.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// Timestamped compact output without ANSI colors. Honours `RUST_LOG`, defaults to `info`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();
}
