//! Spawns the site on a random port with every outbound service pointed at a mock server.
use std::{net::SocketAddr, sync::OnceLock, time::Duration};

use anyhow::Result;
use ayw_site::{app::serve, config::load_config, init_dbg_tracing, App};
use tracing::info;
use wiremock::{matchers::path, Mock, MockServer, Request, ResponseTemplate};

pub const FATHOM_SITE_ID: &str = "TESTSITE";

pub const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>APIs You Won't Hate</title>
    <link>https://apisyouwonthate.com/podcast</link>
    <description>A no-nonsense podcast about API design and development.</description>
    <item>
      <title>Versioning Without Tears</title>
      <link>https://share.transistor.fm/s/f00dcafe</link>
      <description><![CDATA[<p>Phil and Mike talk about <strong>evolution</strong> over versioning.</p>]]></description>
      <itunes:episode>12</itunes:episode>
    </item>
    <item>
      <title>Pagination Is Hard</title>
      <link>https://share.transistor.fm/s/abc123</link>
      <description>Cursors and offsets.</description>
      <itunes:episode>11</itunes:episode>
    </item>
  </channel>
</rss>"#;

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    pub newsletter_server: MockServer,
    pub fathom_server: MockServer,
    pub feed_server: MockServer,
}

fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

impl TestApp {
    /// Binds port 0 so the OS picks a free port for every test.
    pub async fn spawn() -> Result<Self> {
        init_test_subscriber();

        let newsletter_server = MockServer::start().await;
        let fathom_server = MockServer::start().await;
        let feed_server = MockServer::start().await;

        let mut config = load_config()?;
        config.net_config.app_port = 0;
        config.newsletter_config.base_url = newsletter_server.uri();
        config.newsletter_config.timeout_millis = 500;
        config.analytics_config.endpoint = fathom_server.uri();
        config.analytics_config.fathom_site_id = Some(FATHOM_SITE_ID.to_string());
        config.podcast_config.feed_url = format!("{}/feed", feed_server.uri());

        let app = App::build_from_config(config).await?;
        let addr = app.listener.local_addr()?;
        info!("Test app listening on {addr}");

        tokio::spawn(serve(app));

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(TestApp {
            addr,
            http_client,
            newsletter_server,
            fathom_server,
            feed_server,
        })
    }

    pub fn url(&self, route: &str) -> String {
        format!("http://{}{route}", self.addr)
    }

    pub async fn get_page(&self, route: &str) -> Result<reqwest::Response> {
        Ok(self.http_client.get(self.url(route)).send().await?)
    }

    pub async fn post_newsletter(&self, form: &[(&str, &str)]) -> Result<reqwest::Response> {
        Ok(self
            .http_client
            .post(self.url("/newsletter"))
            .form(form)
            .send()
            .await?)
    }

    pub async fn serve_feed(&self, body: &str) {
        Mock::given(path("/feed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body.as_bytes().to_vec(), "application/rss+xml"),
            )
            .mount(&self.feed_server)
            .await;
    }

    /// Goal events are fire-and-forget, so poll until `expected` requests arrived or time runs out.
    pub async fn fathom_requests(&self, expected: usize) -> Vec<Request> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let received = self
                .fathom_server
                .received_requests()
                .await
                .unwrap_or_default();
            if received.len() >= expected || tokio::time::Instant::now() >= deadline {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}
