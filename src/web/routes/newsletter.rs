use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::podcast::episode_context;
use crate::{
    newsletter::{SubmissionState, SubscriptionForm},
    templ_manager::Page,
    web::WebResult,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct NewsletterFields {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    /// Page the form was posted from, rendered again with the result.
    #[serde(default)]
    page: Page,
}

/// Handles the footer signup form.
///
/// An email that fails validation never reaches the newsletter service; the form is rendered
/// again with the entered values and a `422`.
#[tracing::instrument(
    name = "Newsletter signup",
    skip(app_state, fields),
    fields(
        subscriber_email = %fields.email,
        subscriber_name = %fields.name,
        page = fields.page.as_ref()
    )
)]
pub async fn newsletter_signup(
    State(app_state): State<AppState>,
    Form(fields): Form<NewsletterFields>,
) -> WebResult<impl IntoResponse> {
    let mut form = SubscriptionForm::new(&app_state.goal_id);
    form.update_name(fields.name);
    form.update_email(fields.email);

    let state = form
        .submit(&app_state.newsletter_client, &app_state.goal_tracker)
        .await;
    let status = match state {
        SubmissionState::Idle => {
            info!("Email failed validation, nothing was sent");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SubmissionState::Succeeded(_) => {
            info!("Subscription acknowledged");
            StatusCode::OK
        }
        _ => StatusCode::OK,
    };

    let (page, ctx) = match fields.page {
        // The signup already happened, a feed outage must not hide its result.
        Page::Podcast => match episode_context(&app_state).await {
            Ok(ctx) => (Page::Podcast, ctx),
            Err(e) => {
                warn!(error = %e, "podcast feed unavailable, rendering the landing page");
                (Page::Home, tera::Context::new())
            }
        },
        page => (page, tera::Context::new()),
    };

    let body = app_state
        .templ_mgr
        .render_page(ctx, page, &form.view())
        .context("tera failed to render the newsletter form")?;

    Ok((status, Html(body)))
}
