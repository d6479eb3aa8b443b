use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(handlers::get_profile))
        .route("/user/blogs", get(handlers::list_blogs))
}
