//! User API endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::models::User;
use crate::AppState;

/// GET /api/users - List all users as a bare array.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.repo.list_users().await?;
    Ok(Json(users))
}
