use common::error::{AppError, Res};
use dashmap::DashMap;
use uuid::Uuid;

use crate::{
    dtos::subscription::SubscriptionCreateRequest, models::subscription::Subscription,
    store::SubscriptionStore,
};

/// In-process store keyed by subscription id.
#[derive(Default)]
pub struct MemorySubscriptionStore {
    records: DashMap<Uuid, Subscription>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SubscriptionStore for MemorySubscriptionStore {
    async fn insert(&self, data: SubscriptionCreateRequest) -> Res<Subscription> {
        let id = Uuid::new_v4();
        let record = data.into_subscription(id);
        self.records.insert(id, record.clone());
        log::debug!("stored subscription {} for owner {}", id, record.owner_id);
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Res<Subscription> {
        self.records
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("subscription {}", id)))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Res<Vec<Subscription>> {
        let mut records: Vec<Subscription> = self
            .records
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use common::misc::{Category, Currency, Frequency, SubscriptionStatus};

    use super::*;

    fn request(owner_id: Uuid, created_offset_secs: i64) -> SubscriptionCreateRequest {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        SubscriptionCreateRequest {
            name: "Netflix".to_string(),
            price: 15.99,
            currency: Currency::Usd,
            frequency: Some(Frequency::Monthly),
            category: Category::Movies,
            payment_method: "Credit Card".to_string(),
            status: SubscriptionStatus::Active,
            start_date: start,
            renewal_date: start + Duration::days(30),
            owner_id,
            created_at: start + Duration::seconds(created_offset_secs),
        }
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_record() {
        let store = MemorySubscriptionStore::new();
        let owner = Uuid::new_v4();

        let stored = store.insert(request(owner, 0)).await.unwrap();
        let fetched = store.get(stored.id).await.unwrap();

        assert_eq!(stored, fetched);
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert_eq!(store.list_by_owner(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = MemorySubscriptionStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_by_owner_filters_and_orders_by_creation() {
        let store = MemorySubscriptionStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let later = store.insert(request(owner, 60)).await.unwrap();
        let earlier = store.insert(request(owner, 0)).await.unwrap();
        store.insert(request(other, 30)).await.unwrap();

        let records = store.list_by_owner(owner).await.unwrap();
        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![earlier.id, later.id]);
        assert!(store.list_by_owner(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record = request(Uuid::nil(), 0).into_subscription(Uuid::nil());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["paymentMethod"], "Credit Card");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["frequency"], "monthly");
        assert!(json.get("renewalDate").is_some());
        assert!(json.get("ownerId").is_some());
    }
}
