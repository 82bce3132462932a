use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PartnerApplication;

pub async fn create(
    pool: &PgPool,
    account_id: Option<Uuid>,
    name: &str,
    email: &str,
    phone_number: &str,
    government_id_url: Option<&str>,
    business_certificate_url: Option<&str>,
    work_sample_urls: &[String],
) -> Result<PartnerApplication, sqlx::Error> {
    sqlx::query_as::<_, PartnerApplication>(
        "INSERT INTO partner_applications
            (account_id, name, email, phone_number, government_id_url,
             business_certificate_url, work_sample_urls)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(account_id)
    .bind(name)
    .bind(email)
    .bind(phone_number)
    .bind(government_id_url)
    .bind(business_certificate_url)
    .bind(work_sample_urls)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    status: Option<&str>,
) -> Result<Vec<PartnerApplication>, sqlx::Error> {
    sqlx::query_as::<_, PartnerApplication>(
        "SELECT * FROM partner_applications
         WHERE ($1::text IS NULL OR status = $1)
         ORDER BY created_at DESC",
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PartnerApplication>, sqlx::Error> {
    sqlx::query_as::<_, PartnerApplication>("SELECT * FROM partner_applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<PartnerApplication, sqlx::Error> {
    sqlx::query_as::<_, PartnerApplication>(
        "UPDATE partner_applications SET status = $2, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .await
}
