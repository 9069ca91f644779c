//! Health Lambda - Handles GET /health.
//!
//! Always returns 200 with the service identity. Depends on nothing, so it
//! stays green while the rewrite endpoints are unconfigured or Gemini is
//! unavailable.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use shared::http::json_response;
use tracing_subscriber::EnvFilter;

/// Health check payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn handler(_event: Request) -> Result<Response<Body>, Error> {
    json_response(
        200,
        &HealthResponse {
            status: "ok",
            service: "letter-to-stars-ai",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(handler)).await
}
