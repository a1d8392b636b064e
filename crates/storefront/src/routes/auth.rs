//! Authentication route handlers.
//!
//! Session-cookie auth over email + password accounts. Sign-in cycles the
//! session id to prevent fixation. Once an identity is set, cart and
//! wishlist keys derive from its email, so signing in or out switches the
//! effective lists.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gadget_grove_core::Role;

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Register a new customer account and sign it in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.pool());
    let user = service
        .register(&form.email, &form.name, &form.password, Role::Customer)
        .await?;

    let current = CurrentUser::from(&user);
    sign_in(&session, &current).await?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((StatusCode::CREATED, Json(current)))
}

/// Sign in with email and password.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<CurrentUser>> {
    let service = AuthService::new(state.pool());
    let user = service.login(&form.email, &form.password).await?;

    let current = CurrentUser::from(&user);
    sign_in(&session, &current).await?;

    tracing::info!(user_id = %user.id, "signed in");

    Ok(Json(current))
}

/// Sign out the current account.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    crate::error::clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// Who am I: the signed-in identity, or 401 for guests.
#[instrument(skip(user))]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Result<Json<CurrentUser>> {
    user.map(Json)
        .ok_or_else(|| AppError::Unauthorized("not signed in".to_owned()))
}

async fn sign_in(session: &Session, user: &CurrentUser) -> Result<()> {
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_current_user(session, user)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    crate::error::set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(())
}
