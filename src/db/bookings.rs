use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Booking;

pub async fn create(
    pool: &PgPool,
    account_id: Uuid,
    service_id: Uuid,
    vendor_id: Uuid,
    event_date: DateTime<Utc>,
    note: Option<&str>,
) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings (account_id, service_id, vendor_id, event_date, note)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(account_id)
    .bind(service_id)
    .bind(vendor_id)
    .bind(event_date)
    .bind(note)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_account(pool: &PgPool, account_id: Uuid) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_vendor(pool: &PgPool, vendor_id: Uuid) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE vendor_id = $1 ORDER BY created_at DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn update_status(pool: &PgPool, id: Uuid, status: &str) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .await
}
