use chrono::{DateTime, Utc};
use common::misc::{Category, Currency, Frequency, SubscriptionStatus};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Candidate record as supplied by a caller. Nothing here is trusted yet.
///
/// Fields stay as raw JSON so a value of the wrong type becomes a field error
/// during validation instead of rejecting the whole record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInput {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub currency: Option<Value>,
    pub frequency: Option<Value>,
    pub category: Option<Value>,
    pub payment_method: Option<Value>,
    pub status: Option<Value>,
    pub start_date: Option<Value>,
    pub renewal_date: Option<Value>,
    #[serde(alias = "user")]
    pub owner_id: Option<Value>,
}

/// A record whose fields all passed validation; the renewal date may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubscription {
    pub name: String,
    pub price: f64,
    pub currency: Currency,
    pub frequency: Option<Frequency>,
    pub category: Category,
    pub payment_method: String,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
}
