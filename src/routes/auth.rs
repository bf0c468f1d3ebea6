// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication routes (username signup/login).

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE};
use crate::models::User;
use crate::time_utils::now_rfc3339;
use crate::AppState;

const MAX_USERNAME_LEN: usize = 50;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
}

#[derive(Deserialize)]
pub struct CredentialsRequest {
    username: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub username: String,
}

fn validate_username(raw: &str) -> Result<String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("Username required".to_string()));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(username.to_string())
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Create a new account and start a session.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let username = validate_username(&req.username)?;

    let user = User {
        username: username.clone(),
        created_at: now_rfc3339(),
    };
    state.db.create_user(&user).await?;

    tracing::info!(username = %username, "New user signed up");

    let token = create_jwt(&username, &state.config.jwt_signing_key)?;
    Ok((
        jar.add(session_cookie(token)),
        Json(SessionResponse { username }),
    ))
}

/// Start a session for an existing account.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let username = validate_username(&req.username)?;

    state.db.get_user(&username).await?.ok_or_else(|| {
        AppError::NotFound(format!("User '{username}' not found, sign up first"))
    })?;

    let token = create_jwt(&username, &state.config.jwt_signing_key)?;
    Ok((
        jar.add(session_cookie(token)),
        Json(SessionResponse { username }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// End the session by clearing the cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(cookie), Json(LogoutResponse { success: true }))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
pub struct MeResponse {
    pub username: String,
    pub created_at: String,
}

/// Get the current user profile.
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let profile = state
        .db
        .get_user(&user.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user.username)))?;

    Ok(Json(MeResponse {
        username: profile.username,
        created_at: profile.created_at,
    }))
}
