//! Rewrite Lambda - Handles POST /rewrite.
//!
//! Parses the rewrite request, runs the orchestration flow against Gemini,
//! and maps failures to the stable outward-facing error categories. The
//! response body never carries upstream detail.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{error_response, json_response};
use shared::{parse_body, ApiResponse, Config, GeminiGenerator, RewriteRequest, RewriteService};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    config: Config,
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let request: RewriteRequest = parse_body!(event.body());

    info!("Processing rewrite to IELTS level {}", request.level);

    let service = RewriteService::new(GeminiGenerator::new(&state.config));
    match service.rewrite(&request).await {
        Ok(result) => json_response(200, &ApiResponse::success(result)),
        Err(e) => {
            error!("Rewrite failed: {}", e);
            error_response(e.status_code(), e.public_message())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState {
        config: Config::from_env(),
    });

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
