#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the `subscribers` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubscriberRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Legacy human-assigned subscriber number, distinct from `id`.
    pub subscriber_id: Option<String>,
    pub mobile: String,
    pub email: Option<String>,
    /// Postal address, possibly multi-line (newline separated).
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub number_of_copies: i32,
    pub subscription_start_date: NaiveDate,
    pub subscription_end_date: NaiveDate,
    /// One of `active`, `expired`, `inactive`.
    pub status: String,
    pub bulk: bool,
    pub samiti: Option<String>,
    /// One of `registered`, `unregistered`.
    pub delivery_method: String,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

/// Payload for creating a subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubscriber {
    pub first_name: String,
    pub last_name: String,
    pub subscriber_id: Option<String>,
    pub mobile: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    #[serde(default = "default_copies")]
    pub number_of_copies: i32,
    pub subscription_start_date: NaiveDate,
    pub subscription_end_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub bulk: bool,
    pub samiti: Option<String>,
    pub delivery_method: String,
    pub payment_method: Option<String>,
}

fn default_copies() -> i32 {
    1
}

fn default_status() -> String {
    "active".to_string()
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriberUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subscriber_id: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub number_of_copies: Option<i32>,
    pub subscription_start_date: Option<NaiveDate>,
    pub subscription_end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub bulk: Option<bool>,
    pub samiti: Option<String>,
    pub delivery_method: Option<String>,
    pub payment_method: Option<String>,
}

/// One row of the `subscription_history` table (append-only renewal log).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubscriptionHistoryRow {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub renewal_date: NaiveDate,
    pub previous_end_date: NaiveDate,
    pub new_end_date: NaiveDate,
    pub amount_paid: Option<f64>,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}
