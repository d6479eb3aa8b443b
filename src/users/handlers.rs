use axum::{extract::State, Json};
use tracing::instrument;

use crate::auth::extractors::AuthUser;
use crate::auth::repo::User;
use crate::blogs::repo::Blog;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{UserBlogsResponse, UserProfile};

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(UserProfile {
        username: user.username,
        full_name: user.full_name,
        joined_date: user.joined_date,
    }))
}

#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<UserBlogsResponse>, ApiError> {
    let blogs = Blog::list_by_username(&state.db, &username).await?;
    Ok(Json(UserBlogsResponse { blogs }))
}
