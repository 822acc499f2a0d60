//! The featured podcast episode.
//!
//! Episodes come from the show's RSS feed. The newest item is the featured one.

use lazy_regex::regex_replace_all;
use reqwest::Client;
use rss::Channel;
use serde::Serialize;
use tracing::{debug, instrument};

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodcastEpisode {
    pub title: String,
    /// The share link, e.g. `https://share.transistor.fm/s/1a2b3c`
    pub link: String,
    pub episode: Option<u32>,
    pub content_snippet: String,
}

impl PodcastEpisode {
    /// The player link: share links use `/s/`, embeds use `/e/`.
    pub fn embed_url(&self) -> String {
        self.link.replacen("/s/", "/e/", 1)
    }

    pub fn heading(&self) -> String {
        match self.episode {
            Some(number) => format!("{} - {}", format_episode_number(number), self.title),
            None => self.title.clone(),
        }
    }

    pub fn iframe_title(&self) -> String {
        match self.episode {
            Some(number) => format!(
                "APIs You Won't Hate Podcast episode {number} - {}",
                self.title
            ),
            None => format!("APIs You Won't Hate Podcast - {}", self.title),
        }
    }

    /// Builds an episode out of a feed item. Items without a title or link are skipped.
    pub fn from_rss_item(item: &rss::Item) -> Option<Self> {
        let title = item.title()?.trim().to_string();
        let link = item.link()?.trim().to_string();
        let episode = item
            .itunes_ext()
            .and_then(|ext| ext.episode())
            .and_then(|ep| ep.trim().parse().ok());
        let content_snippet = item
            .content()
            .or(item.description())
            .map(strip_html)
            .unwrap_or_default();

        Some(PodcastEpisode {
            title,
            link,
            episode,
            content_snippet,
        })
    }

    pub fn view(&self) -> EpisodeView<'_> {
        EpisodeView {
            heading: self.heading(),
            content_snippet: &self.content_snippet,
            embed_url: self.embed_url(),
            iframe_title: self.iframe_title(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EpisodeView<'a> {
    pub heading: String,
    pub content_snippet: &'a str,
    pub embed_url: String,
    pub iframe_title: String,
}

/// `#` and the episode number, zero padded to two digits.
pub fn format_episode_number(number: u32) -> String {
    format!("#{number:02}")
}

fn strip_html(value: &str) -> String {
    let text = regex_replace_all!(r"<[^>]*>", value, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads the podcast RSS feed.
#[derive(Debug, Clone)]
pub struct PodcastFeed {
    http_client: Client,
    feed_url: reqwest::Url,
}

impl PodcastFeed {
    pub fn new<S: AsRef<str>>(feed_url: S, timeout: std::time::Duration) -> Result<Self> {
        let feed_url =
            reqwest::Url::parse(feed_url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(PodcastFeed {
            http_client,
            feed_url,
        })
    }

    #[instrument(name = "Fetching the podcast feed", skip_all, fields(feed_url = %self.feed_url))]
    pub async fn latest_episode(&self) -> Result<PodcastEpisode> {
        let body = self
            .http_client
            .get(self.feed_url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let channel = Channel::read_from(&body[..])?;
        debug!(items = channel.items().len(), "podcast feed parsed");

        channel
            .items()
            .iter()
            .find_map(PodcastEpisode::from_rss_item)
            .ok_or(Error::NoEpisodes)
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse the feed url: {0}")]
    UrlParsing(String),
    #[error("the podcast feed has no episodes")]
    NoEpisodes,
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("rss error: {0}")]
    Rss(#[from] rss::Error),
}
