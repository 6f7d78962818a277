/// Contactflow API - contact form notification endpoint
///
/// Receives contact form submissions as JSON, runs them through the core
/// notification pipeline and answers with a `{success, message}` envelope.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    body::Body as AxumBody,
    extract::DefaultBodyLimit,
    http::{Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use contactflow_core::constants::MAX_REQUEST_BODY_BYTES;
use lambda_http::{Body, Error as LambdaError, Request, Response};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Builds the axum router for the endpoint
pub fn router(ctx: Arc<ApiContext>) -> Router {
    let v1_router = Router::new()
        .route("/health", get(api::health::handler))
        .route(
            "/contact",
            post(api::contact::submit).fallback(api::contact::method_not_allowed),
        );

    Router::new()
        .nest("/v1", v1_router)
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&ctx),
            middleware::logging_middleware,
        ))
        // Browsers post from the marketing site's origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(ctx)
}

/// Lambda entry point: runs one API Gateway request through the router
pub async fn handler(ctx: Arc<ApiContext>, event: Request) -> Result<Response<Body>, LambdaError> {
    let (parts, body) = event.into_parts();
    let request = http::Request::from_parts(parts, AxumBody::from(body.to_vec()));

    let response = match router(ctx).oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_REQUEST_BODY_BYTES)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to buffer response body");
            LambdaError::from(e.to_string())
        })?;

    Ok(Response::from_parts(parts, Body::from(bytes.to_vec())))
}
