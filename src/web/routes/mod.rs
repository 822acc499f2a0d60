//! Contains all the routes that this application can handle.

mod conduct;
mod home;
mod newsletter;
mod podcast;

use crate::AppState;
use conduct::conduct;
use home::home;
use newsletter::newsletter_signup;
use podcast::podcast;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/conduct", get(conduct))
        .route("/podcast", get(podcast))
        .route("/newsletter", post(newsletter_signup))
        .with_state(app_state)
        .route("/health-check", get(health_check))
}
