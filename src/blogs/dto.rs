use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blogs::repo::{Blog, SearchHit};

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Partial update. Absent fields leave the stored value untouched; for
/// `thumbnail`, an explicitly-empty string clears it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub blog_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBlogRequest {
    pub blog_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct BlogMutationResponse {
    pub message: &'static str,
    pub blog_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BlogEnvelope {
    pub blog: Blog,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub blogs: Vec<SearchHit>,
}
