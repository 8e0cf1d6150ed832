use sqlx::PgPool;

use crate::models::{User, UserCredentials};
use crate::utils::error::AppError;

pub async fn find_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, password, name FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, email, created_at FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, email, created_at FROM users ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

pub async fn email_taken(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Inserts an account. A concurrent duplicate surfaces as the same
/// validation error as the up-front check in the handler.
pub async fn insert(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password, created_at)
        VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::ValidationError("Email já está em uso".to_string())
        }
        other => AppError::DatabaseError(other),
    })
}

/// Deletes the user unless it is the last one left. Returns whether a row
/// was removed.
pub async fn delete_unless_last(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let done = sqlx::query(
        "DELETE FROM users WHERE id = $1 AND (SELECT COUNT(*) FROM users) > 1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(done.rows_affected() > 0)
}

/// Creates the account or, when the e-mail already exists, overwrites its
/// name and password in place. The row is never absent in between.
pub async fn upsert_by_email(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password, created_at)
        VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
        ON CONFLICT (email) DO UPDATE
        SET password = EXCLUDED.password, name = EXCLUDED.name
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}
