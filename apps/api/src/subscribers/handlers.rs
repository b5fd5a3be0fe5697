//! Axum route handlers for the Subscriber API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::subscriber::{NewSubscriber, SubscriberRow, SubscriberUpdate, SubscriptionHistoryRow};
use crate::state::AppState;
use crate::subscribers::store::{self, SubscriberFilters, SubscriberPage};
use crate::subscribers::validation::{validate_new_subscriber, validate_subscriber_update};

/// GET /api/v1/subscribers
///
/// Filtered, paginated listing; filters arrive as query parameters.
pub async fn handle_list_subscribers(
    State(state): State<AppState>,
    Query(filters): Query<SubscriberFilters>,
) -> Result<Json<SubscriberPage>, AppError> {
    let page = store::list_subscribers(&state.db, &filters).await?;
    Ok(Json(page))
}

/// POST /api/v1/subscribers
pub async fn handle_create_subscriber(
    State(state): State<AppState>,
    Json(new): Json<NewSubscriber>,
) -> Result<(StatusCode, Json<SubscriberRow>), AppError> {
    validate_new_subscriber(&new).map_err(|errors| AppError::Validation(errors.join("; ")))?;
    let row = store::create_subscriber(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/subscribers/:id
pub async fn handle_get_subscriber(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubscriberRow>, AppError> {
    let row = store::get_subscriber(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscriber {id} not found")))?;
    Ok(Json(row))
}

/// PUT /api/v1/subscribers/:id
pub async fn handle_update_subscriber(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<SubscriberUpdate>,
) -> Result<Json<SubscriberRow>, AppError> {
    validate_subscriber_update(&update)
        .map_err(|errors| AppError::Validation(errors.join("; ")))?;
    let row = store::update_subscriber(&state.db, id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscriber {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/subscribers/:id
pub async fn handle_delete_subscriber(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !store::delete_subscriber(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Subscriber {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/subscribers/:id/history
pub async fn handle_subscription_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SubscriptionHistoryRow>>, AppError> {
    let history = store::history_for(&state.db, id).await?;
    Ok(Json(history))
}

#[derive(Debug, Deserialize)]
pub struct RenewalRequest {
    pub renewal_date: NaiveDate,
    pub new_end_date: NaiveDate,
    pub amount_paid: Option<f64>,
    pub payment_method: Option<String>,
}

/// POST /api/v1/subscribers/:id/renew
///
/// Appends a history row and advances the subscription end date.
pub async fn handle_renew_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewalRequest>,
) -> Result<Json<SubscriberRow>, AppError> {
    let subscriber = store::get_subscriber(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscriber {id} not found")))?;

    if request.new_end_date <= subscriber.subscription_end_date {
        return Err(AppError::Validation(
            "new_end_date must be after the current subscription end date".to_string(),
        ));
    }

    let updated = store::record_renewal(
        &state.db,
        &subscriber,
        request.renewal_date,
        request.new_end_date,
        request.amount_paid,
        request.payment_method.as_deref(),
    )
    .await?;
    Ok(Json(updated))
}
