//! Authentication route handlers.
//!
//! Handles registration, login, and logout backed by the local `users`
//! table and server-side sessions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::{MessageQuery, flash_message};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
    pub current_username: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
    pub current_username: Option<String>,
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(flash_message),
        current_username: None,
    }
}

/// Handle registration form submission.
///
/// On success redirects to the login page; the new user is not logged in
/// automatically.
#[instrument(skip(state, form))]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/register?error=password_mismatch").into_response();
    }

    let service = AuthService::new(state.pool());
    match service.register(&form.username, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = user.id.as_i32(), "User registered");
            Redirect::to("/login?success=registered").into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/register?error=username_taken").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/register?error=password_too_short").into_response()
        }
        Err(AuthError::InvalidUsername(_)) => {
            Redirect::to("/register?error=username_invalid").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            sentry::capture_error(&e);
            Redirect::to("/register?error=failed").into_response()
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(flash_message),
        success: query.success.as_deref().map(flash_message),
        current_username: None,
    }
}

/// Handle login form submission.
///
/// An unknown username and a wrong password produce the same redirect, so
/// the login form doesn't leak which usernames exist.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let service = AuthService::new(state.pool());
    match service.login(&form.username, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                username: user.username.clone(),
            };

            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/login?error=session").into_response();
            }

            tracing::info!(user_id = user.id.as_i32(), "User logged in");
            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::debug!("Login failed: invalid credentials");
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            sentry::capture_error(&e);
            Redirect::to("/login?error=failed").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the current user and destroys the whole session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}
