//! Topic API endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::models::TopicsResponse;
use crate::AppState;

/// GET /api/topics - List all topics.
pub async fn list_topics(State(state): State<AppState>) -> ApiResult<TopicsResponse> {
    let topics = state.repo.list_topics().await?;
    Ok(Json(TopicsResponse { topics }))
}
