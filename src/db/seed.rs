//! Fixture loading.
//!
//! Replaces the contents of every table with a dataset. Article and comment ids restart at 1,
//! so the n-th fixture article always gets `article_id = n`.

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::{Comment, NewArticle, Topic, User};

const REFERENCE_DATA: &str = include_str!("../../data/test-data.json");

/// A complete dataset for all four tables.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
    pub articles: Vec<NewArticle>,
    pub comments: Vec<Comment>,
}

impl SeedData {
    /// The reference dataset bundled with the binary.
    pub fn reference() -> Result<Self, AppError> {
        Self::from_json(REFERENCE_DATA)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("Invalid seed data: {}", e)))
    }
}

/// Wipe all tables and load `data` in one transaction.
pub async fn seed(pool: &SqlitePool, data: &SeedData) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    // Children first so foreign keys hold at every step
    for table in ["comments", "articles", "users", "topics"] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?;
    }
    sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('articles', 'comments')")
        .execute(&mut *tx)
        .await?;

    for topic in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES (?, ?)")
            .bind(&topic.slug)
            .bind(&topic.description)
            .execute(&mut *tx)
            .await?;
    }

    for user in &data.users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .execute(&mut *tx)
            .await?;
    }

    for article in &data.articles {
        sqlx::query(
            "INSERT INTO articles (title, topic, author, body, created_at, votes) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&article.title)
        .bind(&article.topic)
        .bind(&article.author)
        .bind(&article.body)
        .bind(article.created_at)
        .bind(article.votes)
        .execute(&mut *tx)
        .await?;
    }

    for comment in &data.comments {
        sqlx::query(
            "INSERT INTO comments (article_id, author, body, votes, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(comment.article_id)
        .bind(&comment.author)
        .bind(&comment.body)
        .bind(comment.votes)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        topics = data.topics.len(),
        users = data.users.len(),
        articles = data.articles.len(),
        comments = data.comments.len(),
        "Database seeded"
    );

    Ok(())
}
