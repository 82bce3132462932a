use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Service, ServiceFeedback};

pub async fn create(
    pool: &PgPool,
    vendor_id: Uuid,
    title: &str,
    category: &str,
    description: Option<&str>,
    price: f64,
    city: Option<&str>,
    image_urls: &[String],
    video_urls: &[String],
) -> Result<Service, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "INSERT INTO services (vendor_id, title, category, description, price, city, image_urls, video_urls)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(vendor_id)
    .bind(title)
    .bind(category)
    .bind(description)
    .bind(price)
    .bind(city)
    .bind(image_urls)
    .bind(video_urls)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(
    pool: &PgPool,
    category: Option<&str>,
    city: Option<&str>,
) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "SELECT * FROM services
         WHERE ($1::text IS NULL OR category = $1)
           AND ($2::text IS NULL OR city = $2)
         ORDER BY created_at DESC",
    )
    .bind(category)
    .bind(city)
    .fetch_all(pool)
    .await
}

pub async fn list_by_vendor(pool: &PgPool, vendor_id: Uuid) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "SELECT * FROM services WHERE vendor_id = $1 ORDER BY created_at DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    vendor_id: Uuid,
    title: &str,
    category: &str,
    description: Option<&str>,
    price: f64,
    city: Option<&str>,
    image_urls: &[String],
    video_urls: &[String],
) -> Result<Service, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "UPDATE services SET title = $3, category = $4, description = $5, price = $6,
            city = $7, image_urls = $8, video_urls = $9, updated_at = now()
         WHERE id = $1 AND vendor_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(vendor_id)
    .bind(title)
    .bind(category)
    .bind(description)
    .bind(price)
    .bind(city)
    .bind(image_urls)
    .bind(video_urls)
    .fetch_one(pool)
    .await
}

/// Ownership-scoped delete. Returns the number of rows removed; 0 means the
/// service does not exist or belongs to another vendor.
pub async fn delete(pool: &PgPool, id: Uuid, vendor_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1 AND vendor_id = $2")
        .bind(id)
        .bind(vendor_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Upsert a per-viewer counter: first view inserts a row, repeat views
/// increment it.
pub async fn record_view(
    pool: &PgPool,
    service_id: Uuid,
    account_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO service_views (service_id, account_id)
         VALUES ($1, $2)
         ON CONFLICT (service_id, account_id)
         DO UPDATE SET view_count = service_views.view_count + 1",
    )
    .bind(service_id)
    .bind(account_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn view_count(pool: &PgPool, service_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (Option<i64>,) = sqlx::query_as(
        "SELECT SUM(view_count)::bigint FROM service_views WHERE service_id = $1",
    )
    .bind(service_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0.unwrap_or(0))
}

pub async fn add_feedback(
    pool: &PgPool,
    service_id: Uuid,
    account_id: Uuid,
    user_name: &str,
    rating: i32,
    comment: Option<&str>,
) -> Result<ServiceFeedback, sqlx::Error> {
    sqlx::query_as::<_, ServiceFeedback>(
        "INSERT INTO service_feedback (service_id, account_id, user_name, rating, comment)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(service_id)
    .bind(account_id)
    .bind(user_name)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await
}

pub async fn list_feedback(
    pool: &PgPool,
    service_id: Uuid,
) -> Result<Vec<ServiceFeedback>, sqlx::Error> {
    sqlx::query_as::<_, ServiceFeedback>(
        "SELECT * FROM service_feedback WHERE service_id = $1 ORDER BY created_at DESC",
    )
    .bind(service_id)
    .fetch_all(pool)
    .await
}
