//! Tests whether the 'health-check' route returns an appropriate status code

use anyhow::Result;
use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn healthcheck_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get_page("/health-check").await?;

    assert!(res.status() == StatusCode::OK, "Healthcheck FAILED!");
    assert!(res.headers().contains_key("x-request-id"));

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get_page("/invalidpath").await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}
