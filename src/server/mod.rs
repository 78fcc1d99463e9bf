pub mod handler;

use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::error::{GradeError, Result};
use crate::github::MetadataSource;
use crate::types::report::ErrorResponse;

const INDEX_HTML: &str = include_str!("static/index.html");
const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn routes(
    source: Arc<dyn MetadataSource>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let source_filter = warp::any().map(move || Arc::clone(&source));

    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    let health = warp::path!("health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "ok" })));

    let analyze = warp::path!("analyze")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(source_filter)
        .and_then(handler::analyze_handler);

    let log = warp::log::custom(|info| {
        info!(
            method = %info.method(),
            path = info.path(),
            status = info.status().as_u16(),
            elapsed_ms = info.elapsed().as_millis() as u64,
            "request"
        );
    });

    index
        .or(health)
        .or(analyze)
        .recover(handle_rejection)
        .with(log)
}

async fn handle_rejection(rejection: Rejection) -> std::result::Result<impl Reply, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {e}"))
    } else if rejection.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected a JSON body".to_string(),
        )
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large".to_string(),
        )
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "Content-Length header required".to_string(),
        )
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else {
        tracing::error!(?rejection, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse::new(message)),
        status,
    ))
}

/// Serves the page and analysis endpoint until Ctrl-C.
pub async fn serve(addr: SocketAddr, source: Arc<dyn MetadataSource>) -> Result<()> {
    let (bound, server) = warp::serve(routes(source))
        .try_bind_with_graceful_shutdown(addr, async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown signal received");
        })
        .map_err(|e| GradeError::Server(format!("cannot bind {addr}: {e}")))?;

    info!(address = %bound, "listening");
    println!("Serving on http://{bound}");
    server.await;
    Ok(())
}
