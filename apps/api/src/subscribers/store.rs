//! Postgres persistence for subscribers and their renewal history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::models::subscriber::{
    NewSubscriber, SubscriberRow, SubscriberUpdate, SubscriptionHistoryRow,
};

// ────────────────────────────────────────────────────────────────────────────
// Listing / search
// ────────────────────────────────────────────────────────────────────────────

/// Search filters for the subscriber listing. Name and mobile filters are
/// case-insensitive substring matches; subscriber_id and status are exact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriberFilters {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subscriber_id: Option<String>,
    pub mobile: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of subscriber search results.
#[derive(Debug, Serialize)]
pub struct SubscriberPage {
    pub data: Vec<SubscriberRow>,
    pub count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &SubscriberFilters) {
    let mut sep = " WHERE ";
    if let Some(v) = filters.first_name.as_deref().filter(|v| !v.is_empty()) {
        builder
            .push(sep)
            .push("first_name ILIKE ")
            .push_bind(format!("%{v}%"));
        sep = " AND ";
    }
    if let Some(v) = filters.last_name.as_deref().filter(|v| !v.is_empty()) {
        builder
            .push(sep)
            .push("last_name ILIKE ")
            .push_bind(format!("%{v}%"));
        sep = " AND ";
    }
    if let Some(v) = filters.subscriber_id.as_deref().filter(|v| !v.is_empty()) {
        builder
            .push(sep)
            .push("subscriber_id = ")
            .push_bind(v.to_string());
        sep = " AND ";
    }
    if let Some(v) = filters.mobile.as_deref().filter(|v| !v.is_empty()) {
        builder
            .push(sep)
            .push("mobile ILIKE ")
            .push_bind(format!("%{v}%"));
        sep = " AND ";
    }
    if let Some(v) = filters.status.as_deref().filter(|v| !v.is_empty()) {
        builder.push(sep).push("status = ").push_bind(v.to_string());
    }
}

/// Filtered, paginated listing ordered by most recently created.
pub async fn list_subscribers(
    pool: &PgPool,
    filters: &SubscriberFilters,
) -> Result<SubscriberPage, sqlx::Error> {
    let page = filters.page.unwrap_or(1).max(1);
    let limit = filters.limit.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * limit;

    let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM subscribers");
    push_filters(&mut count_query, filters);
    let count: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM subscribers");
    push_filters(&mut query, filters);
    query
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let data: Vec<SubscriberRow> = query.build_query_as().fetch_all(pool).await?;

    Ok(SubscriberPage {
        data,
        count,
        page,
        limit,
        total_pages: (count + limit - 1) / limit,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// CRUD
// ────────────────────────────────────────────────────────────────────────────

pub async fn get_subscriber(pool: &PgPool, id: Uuid) -> Result<Option<SubscriberRow>, sqlx::Error> {
    sqlx::query_as::<_, SubscriberRow>("SELECT * FROM subscribers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_subscriber(
    pool: &PgPool,
    new: &NewSubscriber,
) -> Result<SubscriberRow, sqlx::Error> {
    let row = sqlx::query_as::<_, SubscriberRow>(
        r#"
        INSERT INTO subscribers
            (first_name, last_name, subscriber_id, mobile, email, address,
             city, district, state, pincode, number_of_copies,
             subscription_start_date, subscription_end_date, status, bulk,
             samiti, delivery_method, payment_method)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18)
        RETURNING *
        "#,
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.subscriber_id)
    .bind(&new.mobile)
    .bind(&new.email)
    .bind(&new.address)
    .bind(&new.city)
    .bind(&new.district)
    .bind(&new.state)
    .bind(&new.pincode)
    .bind(new.number_of_copies)
    .bind(new.subscription_start_date)
    .bind(new.subscription_end_date)
    .bind(&new.status)
    .bind(new.bulk)
    .bind(&new.samiti)
    .bind(&new.delivery_method)
    .bind(&new.payment_method)
    .fetch_one(pool)
    .await?;

    info!("Created subscriber {} ({})", row.id, row.mobile);
    Ok(row)
}

/// COALESCE partial update: absent fields keep their current value.
pub async fn update_subscriber(
    pool: &PgPool,
    id: Uuid,
    update: &SubscriberUpdate,
) -> Result<Option<SubscriberRow>, sqlx::Error> {
    sqlx::query_as::<_, SubscriberRow>(
        r#"
        UPDATE subscribers SET
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            subscriber_id = COALESCE($4, subscriber_id),
            mobile = COALESCE($5, mobile),
            email = COALESCE($6, email),
            address = COALESCE($7, address),
            city = COALESCE($8, city),
            district = COALESCE($9, district),
            state = COALESCE($10, state),
            pincode = COALESCE($11, pincode),
            number_of_copies = COALESCE($12, number_of_copies),
            subscription_start_date = COALESCE($13, subscription_start_date),
            subscription_end_date = COALESCE($14, subscription_end_date),
            status = COALESCE($15, status),
            bulk = COALESCE($16, bulk),
            samiti = COALESCE($17, samiti),
            delivery_method = COALESCE($18, delivery_method),
            payment_method = COALESCE($19, payment_method),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.subscriber_id)
    .bind(&update.mobile)
    .bind(&update.email)
    .bind(&update.address)
    .bind(&update.city)
    .bind(&update.district)
    .bind(&update.state)
    .bind(&update.pincode)
    .bind(update.number_of_copies)
    .bind(update.subscription_start_date)
    .bind(update.subscription_end_date)
    .bind(&update.status)
    .bind(update.bulk)
    .bind(&update.samiti)
    .bind(&update.delivery_method)
    .bind(&update.payment_method)
    .fetch_optional(pool)
    .await
}

/// Returns true when a row was deleted.
pub async fn delete_subscriber(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ────────────────────────────────────────────────────────────────────────────
// Label eligibility
// ────────────────────────────────────────────────────────────────────────────

/// Active subscribers whose subscription has not ended, ordered by city then
/// state. This ordering is the stable secondary sort the layout engine
/// relies on — the engine itself never reorders.
pub async fn active_for_labels(pool: &PgPool) -> Result<Vec<SubscriberRow>, sqlx::Error> {
    sqlx::query_as::<_, SubscriberRow>(
        r#"
        SELECT * FROM subscribers
        WHERE status = 'active' AND subscription_end_date >= CURRENT_DATE
        ORDER BY city ASC, state ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Renewal history
// ────────────────────────────────────────────────────────────────────────────

pub async fn history_for(
    pool: &PgPool,
    subscriber_id: Uuid,
) -> Result<Vec<SubscriptionHistoryRow>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionHistoryRow>(
        "SELECT * FROM subscription_history WHERE subscriber_id = $1 ORDER BY created_at DESC",
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await
}

/// Records a renewal: append a history row carrying the previous end date,
/// then advance the subscription and reset status to active. Runs in a
/// transaction so the log never disagrees with the subscriber row.
pub async fn record_renewal(
    pool: &PgPool,
    subscriber: &SubscriberRow,
    renewal_date: NaiveDate,
    new_end_date: NaiveDate,
    amount_paid: Option<f64>,
    payment_method: Option<&str>,
) -> Result<SubscriberRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO subscription_history
            (subscriber_id, renewal_date, previous_end_date, new_end_date,
             amount_paid, payment_method)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(subscriber.id)
    .bind(renewal_date)
    .bind(subscriber.subscription_end_date)
    .bind(new_end_date)
    .bind(amount_paid)
    .bind(payment_method)
    .execute(&mut *tx)
    .await?;

    let updated = sqlx::query_as::<_, SubscriberRow>(
        r#"
        UPDATE subscribers
        SET subscription_end_date = $2, status = 'active', updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(subscriber.id)
    .bind(new_end_date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Renewed subscriber {} through {new_end_date}",
        subscriber.id
    );
    Ok(updated)
}
