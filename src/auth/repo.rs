use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string, never exposed in JSON
    #[serde(with = "time::serde::rfc3339")]
    pub joined_date: OffsetDateTime,
}

impl User {
    /// Find a user by their unique username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, full_name, password_hash, joined_date
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password.
    ///
    /// Returns the raw sqlx error so callers can surface a raced
    /// unique-violation on `username` as a conflict.
    pub async fn create(
        db: &PgPool,
        username: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, full_name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, full_name, password_hash, joined_date
            "#,
        )
        .bind(username)
        .bind(full_name)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
