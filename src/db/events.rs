use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::pagination::PageRequest;
use crate::models::{Event, EventDraft, EventStatus};

/// `$1` is the settled status, `$2` today, `$3` the status that moves.
const SETTLE_PAST_EVENTS: &str = r#"
    UPDATE events
    SET status = $1, updated_at = CURRENT_TIMESTAMP
    WHERE event_date < $2 AND status = $3
"#;

/// Applies [`EventStatus::settled`] to every row dated before `today`.
pub async fn settle_past_events(pool: &PgPool, today: NaiveDate) -> Result<u64, sqlx::Error> {
    let (from, to) = EventStatus::SETTLES;
    let done = sqlx::query(SETTLE_PAST_EVENTS)
        .bind(to.as_str())
        .bind(today)
        .bind(from.as_str())
        .execute(pool)
        .await?;
    Ok(done.rows_affected())
}

pub async fn list(
    pool: &PgPool,
    status: Option<EventStatus>,
    page: PageRequest,
) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM events
        WHERE ($1::varchar IS NULL OR status = $1)
        ORDER BY event_date DESC, event_time DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(status.map(EventStatus::as_str))
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool, status: Option<EventStatus>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE ($1::varchar IS NULL OR status = $1)")
        .bind(status.map(EventStatus::as_str))
        .fetch_one(pool)
        .await
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &PgPool, draft: &EventDraft) -> Result<Event, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO events (title, description, event_date, event_time, image_url, location, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.event_date)
    .bind(draft.event_time)
    .bind(&draft.image_url)
    .bind(&draft.location)
    .bind(draft.status.as_str())
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    draft: &EventDraft,
) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE events
        SET title = $1,
            description = $2,
            event_date = $3,
            event_time = $4,
            location = $5,
            status = $6,
            image_url = $7,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $8
        RETURNING *
        "#,
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.event_date)
    .bind(draft.event_time)
    .bind(&draft.location)
    .bind(draft.status.as_str())
    .bind(&draft.image_url)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let done = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(done.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_sweep_uses_strict_date_comparison() {
        // Events dated today stay scheduled, matching `EventStatus::settled`.
        assert!(SETTLE_PAST_EVENTS.contains("event_date < $2"));
        assert!(SETTLE_PAST_EVENTS.contains("status = $3"));
    }
}
