use sqlx::PgPool;
use uuid::Uuid;

use crate::models::InvitationTemplate;

pub async fn create(
    pool: &PgPool,
    name: &str,
    category: &str,
    body: &str,
    preview_url: Option<&str>,
) -> Result<InvitationTemplate, sqlx::Error> {
    sqlx::query_as::<_, InvitationTemplate>(
        "INSERT INTO invitation_templates (name, category, body, preview_url)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(category)
    .bind(body)
    .bind(preview_url)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    category: Option<&str>,
) -> Result<Vec<InvitationTemplate>, sqlx::Error> {
    sqlx::query_as::<_, InvitationTemplate>(
        "SELECT * FROM invitation_templates
         WHERE ($1::text IS NULL OR category = $1)
         ORDER BY created_at DESC",
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<InvitationTemplate>, sqlx::Error> {
    sqlx::query_as::<_, InvitationTemplate>("SELECT * FROM invitation_templates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    category: &str,
    body: &str,
    preview_url: Option<&str>,
) -> Result<InvitationTemplate, sqlx::Error> {
    sqlx::query_as::<_, InvitationTemplate>(
        "UPDATE invitation_templates SET name = $2, category = $3, body = $4,
            preview_url = $5, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(category)
    .bind(body)
    .bind(preview_url)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM invitation_templates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
