use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::User,
};
use crate::error::ApiError;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Username and password are required"));
    }

    let user = User::find_by_username(&state.db, &payload.username)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(username = %user.username, "login with incorrect password");
        return Err(ApiError::IncorrectPassword);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.username)?;

    info!(username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if payload.username.is_empty() || payload.full_name.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("All fields are required"));
    }

    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already registered");
        return Err(ApiError::Conflict("Username"));
    }

    let hash = hash_password(&payload.password)?;

    let user = match User::create(&state.db, &payload.username, &payload.full_name, &hash).await {
        Ok(u) => u,
        // The existence check above races with concurrent registrations;
        // the unique constraint is the authority.
        Err(e)
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation()) =>
        {
            warn!(username = %payload.username, "username already registered (raced)");
            return Err(ApiError::Conflict("Username"));
        }
        Err(e) => return Err(e.into()),
    };

    info!(username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully",
        }),
    ))
}
