use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use strum_macros::AsRefStr;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("podcast feed error: {0}")]
    Podcast(#[from] crate::podcast::Error),
    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Error::Podcast(_) => (StatusCode::BAD_GATEWAY, ClientError::UpstreamUnavailable),
            Error::Tera(_) | Error::Unexpected(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The part of an error that is safe to show to the client.
#[derive(Debug, AsRefStr, Serialize, derive_more::Display)]
#[serde(tag = "message", content = "detail")]
pub enum ClientError {
    #[display("Service Error!")]
    ServiceError,
    #[display("Upstream service unavailable")]
    UpstreamUnavailable,
}
