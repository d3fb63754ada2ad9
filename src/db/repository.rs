//! Database repository for the fixed set of API queries.
//!
//! Knows nothing about HTTP: misses come back as `None`, failures as `AppError::Database`,
//! and a vote increment the column cannot hold as `AppError::BadRequest`.

use sqlx::error::ErrorKind;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Article, ArticleWithCommentCount, Topic, User};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all topics in insertion order.
    pub async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        let rows = sqlx::query("SELECT slug, description FROM topics ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(topic_from_row).collect())
    }

    /// Get an article with the number of comments referencing it.
    pub async fn get_article_by_id(
        &self,
        article_id: i64,
    ) -> Result<Option<ArticleWithCommentCount>, AppError> {
        let row = sqlx::query(
            r#"SELECT a.article_id, a.title, a.topic, a.author, a.body, a.created_at, a.votes,
                   COUNT(c.comment_id) AS comment_count
            FROM articles a
            LEFT JOIN comments c ON c.article_id = a.article_id
            WHERE a.article_id = ?
            GROUP BY a.article_id"#,
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(article_with_count_from_row).transpose()
    }

    /// Add `delta` to an article's votes and return the updated row.
    ///
    /// Runs as a single statement so concurrent patches are serialized by SQLite.
    /// A sum outside the `i64` range leaves the row untouched and fails with `BadRequest`.
    pub async fn increment_article_votes(
        &self,
        article_id: i64,
        delta: i64,
    ) -> Result<Option<Article>, AppError> {
        // SQLite would silently promote an overflowing sum to REAL; NULL trips NOT NULL instead
        let result = sqlx::query(
            r#"UPDATE articles SET votes = CASE
                    WHEN ?1 >= 0 AND votes > ?2 - ?1 THEN NULL
                    WHEN ?1 < 0 AND votes < ?3 - ?1 THEN NULL
                    ELSE votes + ?1
                END
            WHERE article_id = ?4
            RETURNING article_id, title, topic, author, body, created_at, votes"#,
        )
        .bind(delta)
        .bind(i64::MAX)
        .bind(i64::MIN)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await;

        let row = match result {
            Err(sqlx::Error::Database(e))
                if matches!(
                    e.kind(),
                    ErrorKind::NotNullViolation | ErrorKind::CheckViolation
                ) =>
            {
                return Err(AppError::BadRequest(format!(
                    "inc_votes {} overflows votes of article {}",
                    delta, article_id
                )));
            }
            other => other?,
        };

        row.as_ref().map(article_from_row).transpose()
    }

    /// List all users in insertion order.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query("SELECT username, name, avatar_url FROM users ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }
}

// Helper functions for row conversion

fn topic_from_row(row: &sqlx::sqlite::SqliteRow) -> Topic {
    Topic {
        slug: row.get("slug"),
        description: row.get("description"),
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        username: row.get("username"),
        name: row.get("name"),
        avatar_url: row.get("avatar_url"),
    }
}

fn article_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Article, AppError> {
    Ok(Article {
        article_id: row.try_get("article_id")?,
        title: row.try_get("title")?,
        topic: row.try_get("topic")?,
        author: row.try_get("author")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes")?,
    })
}

fn article_with_count_from_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ArticleWithCommentCount, AppError> {
    let article = article_from_row(row)?;
    Ok(ArticleWithCommentCount {
        article_id: article.article_id,
        title: article.title,
        topic: article.topic,
        author: article.author,
        body: article.body,
        comment_count: row.try_get("comment_count")?,
        created_at: article.created_at,
        votes: article.votes,
    })
}
