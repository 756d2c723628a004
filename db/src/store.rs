use std::{future::Future, sync::Arc};

use common::error::Res;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::subscription::SubscriptionCreateRequest, models::subscription::Subscription,
    subscription,
};

/// Document store that accepts validated subscriptions and hands them back by id.
pub trait SubscriptionStore: Send + Sync {
    /// Persists the record under a freshly generated identifier.
    fn insert(
        &self,
        data: SubscriptionCreateRequest,
    ) -> impl Future<Output = Res<Subscription>> + Send;

    /// Fails with `AppError::NotFound` when no record has this id.
    fn get(&self, id: Uuid) -> impl Future<Output = Res<Subscription>> + Send;

    fn list_by_owner(&self, owner_id: Uuid) -> impl Future<Output = Res<Vec<Subscription>>> + Send;
}

#[derive(Clone)]
pub struct PgSubscriptionStore {
    pool: Arc<PgPool>,
}

impl PgSubscriptionStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl SubscriptionStore for PgSubscriptionStore {
    async fn insert(&self, data: SubscriptionCreateRequest) -> Res<Subscription> {
        subscription::insert_subscription(self.pool.as_ref(), Uuid::new_v4(), data).await
    }

    async fn get(&self, id: Uuid) -> Res<Subscription> {
        subscription::get_subscription_by_id(self.pool.as_ref(), &id).await
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Res<Vec<Subscription>> {
        subscription::get_subscriptions_by_owner_id(self.pool.as_ref(), &owner_id).await
    }
}
