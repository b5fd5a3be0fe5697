//! Axum route handler for label PDF generation.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::labels::layout::{layout, AddressRecord};
use crate::models::subscriber::SubscriberRow;
use crate::render::render_pdf;
use crate::state::AppState;
use crate::subscribers::store;

/// GET /api/v1/labels
///
/// Generates the monthly mailing-label PDF for all active subscribers and
/// returns it as an attachment. 404 when no subscriber is eligible — the
/// layout engine itself never fails on well-formed input.
pub async fn handle_generate_labels(State(state): State<AppState>) -> Result<Response, AppError> {
    let subscribers = store::active_for_labels(&state.db).await?;
    if subscribers.is_empty() {
        return Err(AppError::NotFound(
            "No active subscribers found".to_string(),
        ));
    }

    info!("Generating labels for {} subscribers", subscribers.len());

    let records: Vec<AddressRecord> = subscribers.iter().map(address_record).collect();
    let geometry = state.sheet.clone();

    // Layout is pure and cheap, but printpdf serialization is CPU-bound;
    // keep both off the async worker threads.
    let pdf_bytes = tokio::task::spawn_blocking(move || {
        let document = layout(&records, &geometry);
        render_pdf(&document)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("label render task failed: {e}")))?
    .map_err(|e| AppError::Render(e.to_string()))?;

    let filename = format!("monthly-labels-{}.pdf", Utc::now().format("%Y-%m-%d"));
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, Bytes::from(pdf_bytes)).into_response())
}

fn address_record(subscriber: &SubscriberRow) -> AddressRecord {
    AddressRecord::new(
        &subscriber.first_name,
        &subscriber.last_name,
        &subscriber.address,
        &subscriber.city,
        &subscriber.district,
        &subscriber.state,
        &subscriber.pincode,
    )
}
