use axum::{extract::State, response::Html};
use tracing::info;

use crate::{
    newsletter::SubscriptionForm,
    podcast,
    templ_manager::Page,
    web::WebResult,
    AppState,
};

/// Shows the newest episode of the podcast feed with its embedded player.
#[tracing::instrument(name = "Rendering the latest podcast episode", skip(app_state))]
pub async fn podcast(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let ctx = episode_context(&app_state).await?;

    let form = SubscriptionForm::new(&app_state.goal_id);
    let body = app_state
        .templ_mgr
        .render_page(ctx, Page::Podcast, &form.view())?;

    Ok(Html(body))
}

/// Template context holding the latest episode.
pub(super) async fn episode_context(app_state: &AppState) -> podcast::Result<tera::Context> {
    let episode = app_state.podcast_feed.latest_episode().await?;
    info!(title = %episode.title, "Latest episode fetched");

    let mut ctx = tera::Context::new();
    ctx.insert("episode", &episode.view());
    Ok(ctx)
}
