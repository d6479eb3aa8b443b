//! Ownership guard for blog mutations.
//!
//! This enforces authorization at the handler boundary, after the target
//! blog has been fetched: a blog that does not exist is reported as
//! missing before ownership is ever evaluated.

use tracing::warn;

use crate::blogs::repo::Blog;
use crate::error::ApiError;

/// Permit the operation iff `username` is the blog's recorded owner.
///
/// Pure and stateless; never mutates the blog. `denial` is the
/// route-specific message returned with the 403.
pub fn ensure_blog_owner(
    username: &str,
    blog: &Blog,
    denial: &'static str,
) -> Result<(), ApiError> {
    if blog.username == username {
        Ok(())
    } else {
        warn!(owner = %blog.username, caller = %username, blog_id = %blog.id, "ownership check failed");
        Err(ApiError::Forbidden(denial))
    }
}
