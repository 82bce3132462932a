use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, EventTask, EventVendor, SubEvent};

pub async fn create(
    pool: &PgPool,
    account_id: Uuid,
    name: &str,
    description: Option<&str>,
    event_date: Option<DateTime<Utc>>,
    budget: Option<f64>,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "INSERT INTO events (account_id, name, description, event_date, budget)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(account_id)
    .bind(name)
    .bind(description)
    .bind(event_date)
    .bind(budget)
    .fetch_one(pool)
    .await
}

pub async fn list_by_account(pool: &PgPool, account_id: Uuid) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "SELECT * FROM events WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    account_id: Uuid,
) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    account_id: Uuid,
    name: &str,
    description: Option<&str>,
    event_date: Option<DateTime<Utc>>,
    budget: Option<f64>,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "UPDATE events SET name = $3, description = $4, event_date = $5, budget = $6,
            updated_at = now()
         WHERE id = $1 AND account_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(account_id)
    .bind(name)
    .bind(description)
    .bind(event_date)
    .bind(budget)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, account_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// ── Sub-events ──────────────────────────────────────────────────

pub async fn create_sub_event(
    pool: &PgPool,
    event_id: Uuid,
    name: &str,
    description: Option<&str>,
    sub_event_date: Option<DateTime<Utc>>,
    budget: Option<f64>,
) -> Result<SubEvent, sqlx::Error> {
    sqlx::query_as::<_, SubEvent>(
        "INSERT INTO sub_events (event_id, name, description, sub_event_date, budget)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(event_id)
    .bind(name)
    .bind(description)
    .bind(sub_event_date)
    .bind(budget)
    .fetch_one(pool)
    .await
}

pub async fn list_sub_events(pool: &PgPool, event_id: Uuid) -> Result<Vec<SubEvent>, sqlx::Error> {
    sqlx::query_as::<_, SubEvent>(
        "SELECT * FROM sub_events WHERE event_id = $1 ORDER BY created_at",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}

/// Update scoped through the parent event's owner.
pub async fn update_sub_event(
    pool: &PgPool,
    id: Uuid,
    account_id: Uuid,
    name: &str,
    description: Option<&str>,
    sub_event_date: Option<DateTime<Utc>>,
    budget: Option<f64>,
) -> Result<SubEvent, sqlx::Error> {
    sqlx::query_as::<_, SubEvent>(
        "UPDATE sub_events SET name = $3, description = $4, sub_event_date = $5, budget = $6,
            updated_at = now()
         WHERE id = $1
           AND event_id IN (SELECT id FROM events WHERE account_id = $2)
         RETURNING *",
    )
    .bind(id)
    .bind(account_id)
    .bind(name)
    .bind(description)
    .bind(sub_event_date)
    .bind(budget)
    .fetch_one(pool)
    .await
}

pub async fn delete_sub_event(
    pool: &PgPool,
    id: Uuid,
    account_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM sub_events
         WHERE id = $1 AND event_id IN (SELECT id FROM events WHERE account_id = $2)",
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

// ── Tasks ───────────────────────────────────────────────────────

pub async fn create_task(
    pool: &PgPool,
    event_id: Uuid,
    sub_event_id: Option<Uuid>,
    title: &str,
    due_date: Option<DateTime<Utc>>,
) -> Result<EventTask, sqlx::Error> {
    sqlx::query_as::<_, EventTask>(
        "INSERT INTO event_tasks (event_id, sub_event_id, title, due_date)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(event_id)
    .bind(sub_event_id)
    .bind(title)
    .bind(due_date)
    .fetch_one(pool)
    .await
}

pub async fn list_tasks(pool: &PgPool, event_id: Uuid) -> Result<Vec<EventTask>, sqlx::Error> {
    sqlx::query_as::<_, EventTask>(
        "SELECT * FROM event_tasks WHERE event_id = $1 ORDER BY created_at",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}

pub async fn update_task(
    pool: &PgPool,
    id: Uuid,
    account_id: Uuid,
    title: &str,
    done: bool,
    due_date: Option<DateTime<Utc>>,
) -> Result<EventTask, sqlx::Error> {
    sqlx::query_as::<_, EventTask>(
        "UPDATE event_tasks SET title = $3, done = $4, due_date = $5
         WHERE id = $1
           AND event_id IN (SELECT id FROM events WHERE account_id = $2)
         RETURNING *",
    )
    .bind(id)
    .bind(account_id)
    .bind(title)
    .bind(done)
    .bind(due_date)
    .fetch_one(pool)
    .await
}

pub async fn delete_task(pool: &PgPool, id: Uuid, account_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM event_tasks
         WHERE id = $1 AND event_id IN (SELECT id FROM events WHERE account_id = $2)",
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

// ── Attached vendors ────────────────────────────────────────────

pub async fn add_vendor(
    pool: &PgPool,
    event_id: Uuid,
    service_id: Uuid,
) -> Result<EventVendor, sqlx::Error> {
    sqlx::query_as::<_, EventVendor>(
        "INSERT INTO event_vendors (event_id, service_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(event_id)
    .bind(service_id)
    .fetch_one(pool)
    .await
}

pub async fn list_vendors(pool: &PgPool, event_id: Uuid) -> Result<Vec<EventVendor>, sqlx::Error> {
    sqlx::query_as::<_, EventVendor>(
        "SELECT * FROM event_vendors WHERE event_id = $1 ORDER BY created_at",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}

pub async fn remove_vendor(
    pool: &PgPool,
    event_id: Uuid,
    service_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM event_vendors WHERE event_id = $1 AND service_id = $2")
        .bind(event_id)
        .bind(service_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
