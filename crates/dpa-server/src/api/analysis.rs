use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use dpa_analysis::Analysis;
use dpa_core::{AttributeRecord, NarrativeReport, NarrativeSection, ScoreReport};
use dpa_scraper::{domain_of, CollectRequest};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{json_body, ApiError, ApiResponse, AppState, ResponseMeta};

fn default_include_search() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    website_url: String,
    #[serde(default = "default_include_search")]
    include_search: bool,
    #[serde(default)]
    instagram_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CrmData {
    crm_report: String,
    sections: Vec<NarrativeSection>,
}

/// Reject requests without a usable website URL.
fn validate(request_id: &RequestId, request: &AnalyzeRequest) -> Result<(), ApiError> {
    let url = request.website_url.trim();
    if url.is_empty() {
        return Err(ApiError::validation(
            request_id.0.clone(),
            "website_url is required",
        ));
    }
    if domain_of(url).is_none() {
        return Err(ApiError::validation(
            request_id.0.clone(),
            format!("website_url is not a valid URL: {url}"),
        ));
    }
    Ok(())
}

async fn run_analysis(state: &AppState, request: &AnalyzeRequest) -> Analysis {
    let profile = request
        .instagram_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let collected = state
        .collector
        .collect(CollectRequest {
            website_url: request.website_url.trim(),
            include_search: request.include_search,
            profile,
        })
        .await;

    let analysis = dpa_analysis::analyze(collected.record, collected.search, collected.profile);
    tracing::info!(
        url = %analysis.website.record.url,
        score = analysis.website.score.score,
        status = %analysis.website.score.status,
        "analysis complete"
    );
    analysis
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Analysis>>, ApiError> {
    let request = json_body(&req_id, payload)?;
    validate(&req_id, &request)?;

    let data = run_analysis(&state, &request).await;
    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn crm_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CrmData>>, ApiError> {
    let request = json_body(&req_id, payload)?;
    validate(&req_id, &request)?;

    let NarrativeReport { sections, text } = run_analysis(&state, &request).await.report;
    Ok(Json(ApiResponse {
        data: CrmData {
            crm_report: text,
            sections,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Score a caller-supplied record without fetching anything.
#[allow(clippy::unused_async)]
pub(super) async fn score(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AttributeRecord>, JsonRejection>,
) -> Result<Json<ApiResponse<ScoreReport>>, ApiError> {
    let record = json_body(&req_id, payload)?;
    Ok(Json(ApiResponse {
        data: dpa_analysis::score(Some(&record)),
        meta: ResponseMeta::new(req_id.0),
    }))
}
