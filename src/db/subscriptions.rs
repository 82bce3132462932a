use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Subscription, SubscriptionPlan};

pub async fn create_plan(
    pool: &PgPool,
    name: &str,
    description: Option<&str>,
    price: f64,
    duration_days: i32,
) -> Result<SubscriptionPlan, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>(
        "INSERT INTO subscription_plans (name, description, price, duration_days)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(duration_days)
    .fetch_one(pool)
    .await
}

pub async fn list_plans(pool: &PgPool) -> Result<Vec<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plans ORDER BY price")
        .fetch_all(pool)
        .await
}

pub async fn find_plan(pool: &PgPool, id: Uuid) -> Result<Option<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_plan(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    description: Option<&str>,
    price: f64,
    duration_days: i32,
) -> Result<SubscriptionPlan, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>(
        "UPDATE subscription_plans SET name = $2, description = $3, price = $4, duration_days = $5
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(duration_days)
    .fetch_one(pool)
    .await
}

pub async fn delete_plan(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM subscription_plans WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn create(
    pool: &PgPool,
    vendor_id: Uuid,
    plan_id: Uuid,
    ends_at: DateTime<Utc>,
) -> Result<Subscription, sqlx::Error> {
    sqlx::query_as::<_, Subscription>(
        "INSERT INTO subscriptions (vendor_id, plan_id, ends_at)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(vendor_id)
    .bind(plan_id)
    .bind(ends_at)
    .fetch_one(pool)
    .await
}

pub async fn list_by_vendor(
    pool: &PgPool,
    vendor_id: Uuid,
) -> Result<Vec<Subscription>, sqlx::Error> {
    sqlx::query_as::<_, Subscription>(
        "SELECT * FROM subscriptions WHERE vendor_id = $1 ORDER BY created_at DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await
}

pub async fn cancel(pool: &PgPool, id: Uuid, vendor_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE subscriptions SET status = 'cancelled'
         WHERE id = $1 AND vendor_id = $2 AND status = 'active'",
    )
    .bind(id)
    .bind(vendor_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
