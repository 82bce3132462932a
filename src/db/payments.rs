use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Payment;

pub async fn create(
    pool: &PgPool,
    account_id: Uuid,
    booking_id: Option<Uuid>,
    subscription_id: Option<Uuid>,
    amount: f64,
    currency: &str,
    provider: &str,
) -> Result<Payment, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        "INSERT INTO payments (account_id, booking_id, subscription_id, amount, currency, provider)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(account_id)
    .bind(booking_id)
    .bind(subscription_id)
    .bind(amount)
    .bind(currency)
    .bind(provider)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_account(pool: &PgPool, account_id: Uuid) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

/// Transition out of `created`. The status guard in the WHERE clause makes
/// the settle idempotent-safe; 0 rows means the payment was already settled.
pub async fn settle(
    pool: &PgPool,
    id: Uuid,
    status: &str,
    provider_ref: Option<&str>,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        "UPDATE payments SET status = $2, provider_ref = COALESCE($3, provider_ref),
            updated_at = now()
         WHERE id = $1 AND status = 'created' RETURNING *",
    )
    .bind(id)
    .bind(status)
    .bind(provider_ref)
    .fetch_optional(pool)
    .await
}
