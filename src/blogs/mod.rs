use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-blog", post(handlers::create_blog))
        .route("/update-blog", put(handlers::update_blog))
        .route("/delete-blog", delete(handlers::delete_blog))
        .route("/blog/:id", get(handlers::get_blog))
        .route("/search", get(handlers::search_blogs))
}
