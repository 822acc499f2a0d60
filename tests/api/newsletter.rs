//! Posting the footer form.

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{TestApp, FATHOM_SITE_ID, FEED};

const SUCCESS_MESSAGE: &str = "Check your inbox to confirm your subscription!";

#[tokio::test]
async fn acknowledged_signup_shows_success_and_tracks_goal_once() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/api/newsletter"))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "name": "Ada", "email": "ada@example.com" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("name", "Ada"), ("email", "ada@example.com")])
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains(SUCCESS_MESSAGE));
    // the form itself is replaced by the message
    assert!(!body.contains(r#"action="/newsletter""#));

    let goals = app.fathom_requests(1).await;
    assert_eq!(goals.len(), 1);
    let query: Vec<(String, String)> = goals[0].url.query_pairs().into_owned().collect();
    assert!(query.contains(&("gid".into(), "S0BKMQCZ".into())));
    assert!(query.contains(&("sid".into(), FATHOM_SITE_ID.into())));

    // nothing else trickles in afterwards
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(app.fathom_requests(1).await.len(), 1);

    Ok(())
}

#[tokio::test]
async fn rejected_signup_shows_the_service_message() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/api/newsletter"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Email already subscribed" })),
        )
        .expect(1)
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("name", "Ada"), ("email", "ada@example.com")])
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("Email already subscribed"));
    assert!(body.contains("alert--error"));
    assert!(!body.contains(SUCCESS_MESSAGE));
    // values survive so the visitor can retry
    assert!(body.contains(r#"value="ada@example.com""#));

    assert!(app.fathom_requests(1).await.is_empty());

    Ok(())
}

#[tokio::test]
async fn invalid_email_never_reaches_the_service() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/api/newsletter"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("name", "Ada"), ("email", "not-an-email")])
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.text().await?;
    assert!(body.contains(r#"aria-invalid="true""#));
    assert!(body.contains(r#"value="not-an-email""#));
    assert!(body.contains(r#"data-submit-enabled="false""#));

    Ok(())
}

#[tokio::test]
async fn missing_fields_are_treated_as_empty() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.post_newsletter(&[]).await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app
        .newsletter_server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn unreachable_service_shows_an_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    // longer than the 500ms client timeout set by the test app
    Mock::given(path("/api/newsletter"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(3)))
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("name", ""), ("email", "ada@example.com")])
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("alert--error"));
    assert!(!body.contains(SUCCESS_MESSAGE));
    assert!(app.fathom_requests(1).await.is_empty());

    Ok(())
}

#[tokio::test]
async fn unexpected_error_body_names_the_status() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/api/newsletter"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("name", "Ada"), ("email", "ada@example.com")])
        .await?;

    let body = res.text().await?;
    assert!(body.contains("Unexpected response from the newsletter service (502"));

    Ok(())
}

#[tokio::test]
async fn signup_from_conduct_renders_the_conduct_page() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/api/newsletter"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("email", "ada@example.com"), ("page", "conduct")])
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("Our Pledge"));
    assert!(body.contains(SUCCESS_MESSAGE));

    Ok(())
}

#[tokio::test]
async fn signup_from_podcast_renders_the_podcast_page() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.serve_feed(FEED).await;

    Mock::given(path("/api/newsletter"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Email already subscribed" })),
        )
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("email", "ada@example.com"), ("page", "podcast")])
        .await?;

    let body = res.text().await?;
    assert!(body.contains("#12 - Versioning Without Tears"));
    assert!(body.contains("Email already subscribed"));
    assert!(body.contains(r#"name="page" value="podcast""#));

    Ok(())
}

#[tokio::test]
async fn signup_from_podcast_survives_a_feed_outage() -> Result<()> {
    let app = TestApp::spawn().await?;
    Mock::given(path("/feed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.feed_server)
        .await;
    Mock::given(path("/api/newsletter"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&app.newsletter_server)
        .await;

    let res = app
        .post_newsletter(&[("email", "ada@example.com"), ("page", "podcast")])
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains(SUCCESS_MESSAGE));

    Ok(())
}
