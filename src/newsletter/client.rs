use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::email::ValidEmail;
use crate::utils::error_chain_string;

/// Path of the newsletter endpoint, joined onto the configured base url.
pub const NEWSLETTER_PATH: &str = "api/newsletter";

// ###################################
// ->   STRUCTS
// ###################################
/// The JSON payload of a single subscription attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeRequest {
    pub name: String,
    pub email: ValidEmail,
}

/// How one subscription attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint answered with a 2xx status.
    Acknowledged,
    /// The endpoint rejected the subscription and told us why.
    Rejected { message: String },
    /// No usable answer from the endpoint.
    Transport { detail: String },
}

/// Error body of the newsletter endpoint.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    message: String,
}

/// Something that accepts subscription requests.
///
/// Implementations never fail: every way a request can go wrong
/// is folded into [`SubmitOutcome`].
pub trait NewsletterApi {
    fn subscribe(&self, request: &SubscribeRequest)
        -> impl Future<Output = SubmitOutcome> + Send;
}

#[derive(Debug, Clone)]
pub struct NewsletterClient {
    pub http_client: Client,
    pub url: reqwest::Url,
}

impl NewsletterClient {
    /// `base_url` may carry a path prefix, with or without a trailing `/`.
    pub fn new<S: AsRef<str>>(base_url: S, timeout: std::time::Duration) -> Result<Self> {
        let mut base =
            reqwest::Url::parse(base_url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;
        // `join` replaces the last segment unless the path ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let url = base
            .join(NEWSLETTER_PATH)
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(NewsletterClient { http_client, url })
    }
}

impl NewsletterApi for NewsletterClient {
    #[tracing::instrument(name = "Posting subscription to the newsletter API", skip_all)]
    async fn subscribe(&self, request: &SubscribeRequest) -> SubmitOutcome {
        let resp = match self
            .http_client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = ?e, "newsletter API unreachable");
                return SubmitOutcome::Transport {
                    detail: error_chain_string(&e),
                };
            }
        };

        let status = resp.status();
        if status.is_success() {
            debug!(%status, "subscription acknowledged");
            return SubmitOutcome::Acknowledged;
        }

        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return SubmitOutcome::Transport {
                    detail: error_chain_string(&e),
                }
            }
        };

        rejection_from_body(status, &body)
    }
}

/// Reads the server supplied `message` out of a non-2xx body.
/// A body without one is treated like a transport failure.
fn rejection_from_body(status: StatusCode, body: &[u8]) -> SubmitOutcome {
    match serde_json::from_slice::<RejectionBody>(body) {
        Ok(RejectionBody { message }) => {
            debug!(%status, %message, "subscription rejected");
            SubmitOutcome::Rejected { message }
        }
        Err(e) => {
            warn!(%status, error = %e, "newsletter API sent an unreadable error body");
            SubmitOutcome::Transport {
                detail: format!("Unexpected response from the newsletter service ({status})"),
            }
        }
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse the newsletter url: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
