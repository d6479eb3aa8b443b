use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::authz::ensure_blog_owner;
use crate::blogs::dto::{
    BlogEnvelope, BlogMutationResponse, CreateBlogRequest, DeleteBlogRequest, MessageResponse,
    SearchParams, SearchResponse, UpdateBlogRequest,
};
use crate::blogs::repo::Blog;
use crate::error::ApiError;
use crate::state::AppState;

/// Stored when a blog is created without a thumbnail; the real one comes
/// from an out-of-band upload the client performs against the blob store.
const DEFAULT_THUMBNAIL_URL: &str = "https://placehold.co/600x400?text=No+Thumbnail";

#[instrument(skip(state, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogMutationResponse>), ApiError> {
    if payload.title.is_empty() || payload.description.is_empty() || payload.content.is_empty() {
        return Err(ApiError::Validation(
            "Title, description, and content are required",
        ));
    }

    let thumbnail = match payload.thumbnail.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_THUMBNAIL_URL,
    };

    let blog = Blog::insert(
        &state.db,
        &username,
        &payload.title,
        &payload.description,
        thumbnail,
        &payload.content,
    )
    .await?;

    info!(blog_id = %blog.id, username = %username, "blog created");
    Ok((
        StatusCode::CREATED,
        Json(BlogMutationResponse {
            message: "Blog added successfully",
            blog_id: blog.id,
        }),
    ))
}

/// Read access is not owner-restricted: any authenticated user may view
/// any blog by id.
#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    AuthUser(_username): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogEnvelope>, ApiError> {
    let blog = Blog::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Blog"))?;
    Ok(Json(BlogEnvelope { blog }))
}

#[instrument(skip(state, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<BlogMutationResponse>, ApiError> {
    let blog_id = payload
        .blog_id
        .ok_or(ApiError::Validation("Blog ID is required"))?;

    let blog = Blog::find_by_id(&state.db, blog_id)
        .await?
        .ok_or(ApiError::NotFound("Blog"))?;
    ensure_blog_owner(&username, &blog, "You can only update your own blog")?;

    // Empty strings are treated as absent for these fields; only the
    // thumbnail distinguishes cleared from omitted.
    let title = payload.title.as_deref().filter(|s| !s.is_empty());
    let description = payload.description.as_deref().filter(|s| !s.is_empty());
    let content = payload.content.as_deref().filter(|s| !s.is_empty());
    let thumbnail = payload.thumbnail.as_deref();

    let updated =
        Blog::update_partial(&state.db, blog.id, title, description, content, thumbnail).await?;

    info!(blog_id = %updated.id, username = %username, "blog updated");
    Ok(Json(BlogMutationResponse {
        message: "Blog updated successfully",
        blog_id: updated.id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Json(payload): Json<DeleteBlogRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let blog_id = payload
        .blog_id
        .ok_or(ApiError::Validation("Blog ID is required"))?;

    let blog = Blog::find_by_id(&state.db, blog_id)
        .await?
        .ok_or(ApiError::NotFound("Blog"))?;
    ensure_blog_owner(&username, &blog, "You can only delete your own blog")?;

    Blog::delete_by_id(&state.db, blog.id).await?;

    info!(blog_id = %blog.id, username = %username, "blog deleted");
    Ok(Json(MessageResponse {
        message: "Blog deleted successfully",
    }))
}

#[instrument(skip(state))]
pub async fn search_blogs(
    State(state): State<AppState>,
    AuthUser(_username): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::Validation("Search query is required"));
    }

    let blogs = Blog::search(&state.db, query).await?;
    Ok(Json(SearchResponse { blogs }))
}
