use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request, Response},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::{
    web::{midware, routes::routes, REQUEST_ID_HEADER},
    App, AppState, Result,
};

/// Serves the site until the listener fails.
pub async fn serve(app: App) -> Result<()> {
    let App {
        app_state,
        listener,
    } = app;

    axum::serve(listener, site_router(app_state)).await?;

    Ok(())
}

/// All routes wrapped in the request id, tracing and error mapping layers.
///
/// Responses travel the layers bottom up: the request id is copied onto the response
/// before `response_mapper` sees it, so error bodies can carry it.
pub fn site_router(app_state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    routes(app_state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(request_trace_layer())
            .layer(middleware::map_response(midware::response_mapper))
            .layer(PropagateRequestIdLayer::new(request_id)),
    )
}

fn request_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let req_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|id| id.to_str().ok())
                .unwrap_or_default();

            tracing::error_span!(
                "serve",
                id = %req_id,
                method = %req.method(),
                path = req.uri().path()
            )
        })
        .on_request(|_req: &Request<Body>, _s: &Span| tracing::debug!("request started"))
        .on_response(|res: &Response<Body>, latency: Duration, _s: &Span| {
            let status = res.status();
            let latency_ms = latency.as_millis() as u64;

            if status.is_server_error() {
                tracing::error!(%status, latency_ms, "request finished")
            } else if status.is_client_error() {
                tracing::warn!(%status, latency_ms, "request finished")
            } else {
                tracing::info!(%status, latency_ms, "request finished")
            }
        })
}
