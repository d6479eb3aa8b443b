use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Blog record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub username: String, // owning user, immutable after creation
    pub title: String,
    pub description: String,
    pub thumbnail: String, // opaque URL; empty means cleared
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Search result projection: everything a result card needs, no content.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Listing projection for a user's own blogs.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogCard {
    pub id: Uuid,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Blog {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, username, title, description, thumbnail, content, created_at, updated_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(blog)
    }

    pub async fn insert(
        db: &PgPool,
        username: &str,
        title: &str,
        description: &str,
        thumbnail: &str,
        content: &str,
    ) -> anyhow::Result<Blog> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (username, title, description, thumbnail, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, title, description, thumbnail, content, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(title)
        .bind(description)
        .bind(thumbnail)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(blog)
    }

    /// Partial update: a `None` field keeps the stored value, a `Some`
    /// overwrites it (for `thumbnail`, `Some("")` clears). `updated_at` is
    /// refreshed unconditionally.
    pub async fn update_partial(
        db: &PgPool,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        content: Option<&str>,
        thumbnail: Option<&str>,
    ) -> anyhow::Result<Blog> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET title       = COALESCE($2, title),
                description = COALESCE($3, description),
                content     = COALESCE($4, content),
                thumbnail   = COALESCE($5, thumbnail),
                updated_at  = now()
            WHERE id = $1
            RETURNING id, username, title, description, thumbnail, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(content)
        .bind(thumbnail)
        .fetch_one(db)
        .await?;
        Ok(blog)
    }

    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Fuzzy search over title and description, delegated to the trigram
    /// index. Relevance-ordered, newest first among equal scores.
    pub async fn search(db: &PgPool, query: &str) -> anyhow::Result<Vec<SearchHit>> {
        let hits = sqlx::query_as::<_, SearchHit>(
            r#"
            SELECT id, title, description, thumbnail, created_at
            FROM blogs
            WHERE title % $1
               OR description % $1
               OR title ILIKE '%' || $1 || '%'
               OR description ILIKE '%' || $1 || '%'
            ORDER BY GREATEST(similarity(title, $1), similarity(description, $1)) DESC,
                     created_at DESC
            "#,
        )
        .bind(query)
        .fetch_all(db)
        .await?;
        Ok(hits)
    }

    pub async fn list_by_username(db: &PgPool, username: &str) -> anyhow::Result<Vec<BlogCard>> {
        let cards = sqlx::query_as::<_, BlogCard>(
            r#"
            SELECT id, thumbnail, title, description, created_at, updated_at
            FROM blogs
            WHERE username = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(username)
        .fetch_all(db)
        .await?;
        Ok(cards)
    }
}
