//! Article API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::Value;

use super::ApiResult;
use crate::errors::{messages, AppError};
use crate::models::{Article, ArticleResponse};
use crate::validation::{validate_article_id, validate_vote_increment};
use crate::AppState;

fn article_id_from_path(path: Result<Path<String>, PathRejection>) -> Result<i64, AppError> {
    let Path(raw) = path.map_err(|e| AppError::BadRequest(format!("path rejected: {}", e)))?;
    validate_article_id(&raw)
}

/// GET /api/articles/:article_id - Get an article with its comment count.
pub async fn get_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<ArticleResponse> {
    let article_id = article_id_from_path(path)?;

    match state.repo.get_article_by_id(article_id).await? {
        Some(article) => Ok(Json(ArticleResponse { article })),
        None => Err(AppError::NotFound(
            messages::ARTICLE_ID_DOES_NOT_EXIST.to_string(),
        )),
    }
}

/// PATCH /api/articles/:article_id - Increment or decrement an article's votes.
///
/// Responds with the bare updated row, without `comment_count`.
pub async fn patch_article_votes(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Article> {
    let article_id = article_id_from_path(path)?;

    let body = match payload {
        Ok(Json(body)) => Some(body),
        Err(e) => {
            tracing::debug!("Vote body rejected: {}", e);
            None
        }
    };
    let increment = validate_vote_increment(body.as_ref())?;

    match state
        .repo
        .increment_article_votes(article_id, increment.inc_votes)
        .await?
    {
        Some(article) => {
            tracing::info!(
                article_id,
                inc_votes = increment.inc_votes,
                votes = article.votes,
                "Article votes updated"
            );
            Ok(Json(article))
        }
        None => Err(AppError::NotFound(messages::ARTICLE_NOT_FOUND.to_string())),
    }
}
