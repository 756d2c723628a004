use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::subscription::SubscriptionCreateRequest, models::subscription::Subscription};

pub async fn get_subscription_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    subscription_id: &Uuid,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
        .bind(subscription_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("subscription {}", subscription_id)))
}

pub async fn get_subscriptions_by_owner_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    owner_id: &Uuid,
) -> Res<Vec<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        "SELECT * FROM subscriptions WHERE owner_id = $1 ORDER BY created_at, id",
    )
    .bind(owner_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    subscription_id: Uuid,
    data: SubscriptionCreateRequest,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (
            id, name, price, currency, frequency, category, payment_method,
            status, start_date, renewal_date, owner_id, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        RETURNING *
        "#,
    )
    .bind(subscription_id)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.currency)
    .bind(data.frequency)
    .bind(data.category)
    .bind(&data.payment_method)
    .bind(data.status)
    .bind(data.start_date)
    .bind(data.renewal_date)
    .bind(data.owner_id)
    .bind(data.created_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
