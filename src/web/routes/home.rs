use anyhow::Context;
use axum::{extract::State, response::Html};

use crate::{newsletter::SubscriptionForm, templ_manager::Page, web::WebResult, AppState};

pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let form = SubscriptionForm::new(&app_state.goal_id);
    let body = app_state
        .templ_mgr
        .render_page(tera::Context::new(), Page::Home, &form.view())
        .context("tera failed to render 'html/home.html' template")?;

    Ok(Html(body))
}
