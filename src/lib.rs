//! Blogging platform backend: user accounts, blog CRUD, and fuzzy search,
//! behind a bearer-token authentication and ownership-authorization flow.

pub mod app;
pub mod auth;
pub mod authz;
pub mod blogs;
pub mod config;
pub mod error;
pub mod state;
pub mod users;
