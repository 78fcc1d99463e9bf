use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::Reply;

use crate::analyze;
use crate::error::{GradeError, Result};
use crate::github::{parse_repo_url, MetadataSource};
use crate::types::metadata::{RepositoryInfo, RepositoryMetadata};
use crate::types::report::{AnalysisResponse, AnalysisResult, ErrorResponse};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

/// A scored repository together with the metadata it was scored from.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub metadata: RepositoryMetadata,
    pub analysis: AnalysisResult,
}

impl Outcome {
    pub fn into_response(self) -> AnalysisResponse {
        let info = RepositoryInfo::from(&self.metadata);
        AnalysisResponse::success(self.analysis, info)
    }
}

/// Validates `url`, fetches its metadata and scores it as of `now`.
///
/// The URL is checked before anything touches the network.
pub async fn run_analysis(
    source: &dyn MetadataSource,
    url: &str,
    now: DateTime<Utc>,
) -> Result<Outcome> {
    let repo = parse_repo_url(url)?;
    let metadata = source.fetch(&repo).await?;
    let analysis = analyze::analyze(&metadata, now);
    info!(repository = %repo, score = analysis.score, "repository scored");
    Ok(Outcome { metadata, analysis })
}

pub fn status_for(error: &GradeError) -> StatusCode {
    match error {
        GradeError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        GradeError::NotFound(_) => StatusCode::NOT_FOUND,
        GradeError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        GradeError::Network(_) | GradeError::MalformedResponse(_) | GradeError::Upstream { .. } => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown to the person using the page.
pub fn user_message(error: &GradeError) -> String {
    match error {
        GradeError::RateLimited { .. } => format!(
            "{error}. Unauthenticated requests are limited to 60 per hour; set GITHUB_TOKEN to raise the limit."
        ),
        GradeError::Network(_) => "Could not reach GitHub. Please try again shortly.".to_string(),
        _ => error.to_string(),
    }
}

pub fn error_reply(error: &GradeError) -> warp::reply::Response {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse::new(user_message(error))),
        status_for(error),
    )
    .into_response()
}

pub async fn analyze_handler(
    request: AnalyzeRequest,
    source: Arc<dyn MetadataSource>,
) -> std::result::Result<warp::reply::Response, Infallible> {
    match run_analysis(source.as_ref(), &request.url, Utc::now()).await {
        Ok(outcome) => Ok(warp::reply::json(&outcome.into_response()).into_response()),
        Err(error) => {
            warn!(url = %request.url.trim(), error = %error, "analysis failed");
            Ok(error_reply(&error))
        }
    }
}
