use sqlx::PgPool;
use uuid::Uuid;

use crate::models::EditorAsset;

pub async fn create(pool: &PgPool, account_id: Uuid, url: &str) -> Result<EditorAsset, sqlx::Error> {
    sqlx::query_as::<_, EditorAsset>(
        "INSERT INTO editor_assets (account_id, url) VALUES ($1, $2) RETURNING *",
    )
    .bind(account_id)
    .bind(url)
    .fetch_one(pool)
    .await
}

pub async fn list_by_account(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<EditorAsset>, sqlx::Error> {
    sqlx::query_as::<_, EditorAsset>(
        "SELECT * FROM editor_assets WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, account_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM editor_assets WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
