use serde::Serialize;
use time::OffsetDateTime;

use crate::blogs::repo::BlogCard;

/// Public profile of the authenticated user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub full_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_date: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct UserBlogsResponse {
    pub blogs: Vec<BlogCard>,
}
