// @awa-component: DOC-FetchHandler
//
//! Fetch endpoint — runs one fetch-and-store batch against the configured upstream.

use axum::Json;
use axum::extract::State;
use docfetch_core::FetchReport;
use tracing::info;

use crate::AppState;
use crate::error::AppResult;

/// `GET /fetch` — fetch documents from the upstream API and store them.
///
/// Responds 200 whenever a batch was produced, even if every record failed.
pub async fn fetch_documents_handler(
    State(state): State<AppState>,
) -> AppResult<Json<FetchReport>> {
    let batch = state.fetcher.fetch_and_store(&state.config.api_url).await?;
    let report = FetchReport::from(batch);

    info!(
        success_count = report.success_count,
        error_count = report.error_count,
        "fetch request completed"
    );

    Ok(Json(report))
}
