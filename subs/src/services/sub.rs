use common::{env_config::RenewalArithmetic, error::Res};
use db::{models::subscription::Subscription, store::SubscriptionStore};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::{
    clock::Clock,
    dtos::sub::SubscriptionInput,
    services::{renewal, validate},
};

/// Validates, derives and persists subscriptions against an injected store.
pub struct SubscriptionService<S, C> {
    store: S,
    clock: C,
    arithmetic: RenewalArithmetic,
}

impl<S: SubscriptionStore, C: Clock> SubscriptionService<S, C> {
    pub fn new(store: S, clock: C, arithmetic: RenewalArithmetic) -> Self {
        Self {
            store,
            clock,
            arithmetic,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a subscription from caller input.
    ///
    /// Validation and derivation errors are returned before anything is stored;
    /// storage errors pass through unchanged.
    pub async fn create(&self, input: SubscriptionInput) -> Res<Subscription> {
        let now = self.clock.now();

        let validated = validate::validate(input, now).inspect_err(|e| {
            debug!("rejected subscription: {}", e);
        })?;
        let derived = renewal::derive(validated, now, self.arithmetic).inspect_err(|e| {
            debug!("could not derive renewal: {}", e);
        })?;

        let stored = self.store.insert(derived).await.inspect_err(|e| {
            warn!("failed to store subscription: {}", e);
        })?;

        info!(
            "created subscription {} for owner {} (renews {}, {})",
            stored.id, stored.owner_id, stored.renewal_date, stored.status
        );
        Ok(stored)
    }

    pub async fn get(&self, id: Uuid) -> Res<Subscription> {
        self.store.get(id).await
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Res<Vec<Subscription>> {
        self.store.list_by_owner(owner_id).await
    }
}
