use chrono::{DateTime, Utc};
use common::misc::{Category, Currency, Frequency, SubscriptionStatus};
use uuid::Uuid;

use crate::models::subscription::Subscription;

/// A validated record with its renewal date derived, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionCreateRequest {
    pub name: String,
    pub price: f64,
    pub currency: Currency,
    pub frequency: Option<Frequency>,
    pub category: Category,
    pub payment_method: String,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub renewal_date: DateTime<Utc>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionCreateRequest {
    pub fn into_subscription(self, id: Uuid) -> Subscription {
        Subscription {
            id,
            name: self.name,
            price: self.price,
            currency: self.currency,
            frequency: self.frequency,
            category: self.category,
            payment_method: self.payment_method,
            status: self.status,
            start_date: self.start_date,
            renewal_date: self.renewal_date,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
