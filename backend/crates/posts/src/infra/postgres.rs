//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostChanges;
use crate::error::StoreResult;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PostRepository for PgPostRepository {
    async fn create(&self, post: &Post) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                content,
                author_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id.as_uuid())
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, title, content, author_id, created_at, updated_at
            FROM posts
            ORDER BY created_at, post_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn list_by_author(&self, author_id: &UserId) -> StoreResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, title, content, author_id, created_at, updated_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at, post_id
            "#,
        )
        .bind(author_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn update_owned(
        &self,
        post_id: &PostId,
        author_id: &UserId,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Post>> {
        // Ownership is part of the filter, so a foreign post is simply no row.
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = CASE
                    WHEN $3::text IS NULL AND $4::text IS NULL THEN updated_at
                    ELSE $5
                END
            WHERE post_id = $1 AND author_id = $2
            RETURNING post_id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(author_id.as_uuid())
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn delete_owned(
        &self,
        post_id: &PostId,
        author_id: &UserId,
    ) -> StoreResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            DELETE FROM posts
            WHERE post_id = $1 AND author_id = $2
            RETURNING post_id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(author_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId::from_uuid(self.post_id),
            title: self.title,
            content: self.content,
            author_id: UserId::from_uuid(self.author_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
