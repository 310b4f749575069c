//! Authentication handlers - registration, login, refresh, logout.
//!
//! Login issues a paired access/refresh token set. The access token goes in
//! the JSON body; the refresh token travels only in an HTTP-only cookie so
//! client scripts can never read it.

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};

use blog_core::domain::User;
use blog_core::error::RepoError;
use blog_core::ports::{AuthError, PasswordService, TokenService};
use blog_shared::dto::{
    LoginRequest, LoginResponse, MessageResponse, RefreshResponse, RegisterRequest, UserResponse,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Name of the refresh token cookie.
pub const REFRESH_COOKIE: &str = "refresh_token";

fn refresh_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_seconds))
        .finish()
}

/// POST /register/
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors: Vec<(String, String)> = Vec::new();
    if req.username.trim().is_empty() {
        errors.push(("username".into(), "This field is required.".into()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        errors.push(("email".into(), "Enter a valid email address.".into()));
    }
    if req.password.is_empty() {
        errors.push(("password".into(), "This field is required.".into()));
    } else if req.password != req.password_confirmation {
        errors.push(("password".into(), "Passwords do not match.".into()));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Uniqueness checks before anything is stored
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::validation(
            "username",
            "A user with that username already exists.",
        ));
    }
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::validation(
            "email",
            "A user with that email already exists.",
        ));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(
        req.username,
        req.email,
        password_hash,
        req.first_name,
        req.last_name,
    );
    // The uniqueness checks above race with concurrent registrations; if the
    // database rejects the insert on a unique index, report it as the same
    // field-keyed validation error the pre-check would have produced.
    let saved = state.users.insert(user).await.map_err(|e| match e {
        RepoError::Constraint(msg) => {
            let field = if msg.contains("email") { "email" } else { "username" };
            AppError::validation(field, format!("A user with that {field} already exists."))
        }
        other => other.into(),
    })?;

    Ok(HttpResponse::Created().json(UserResponse {
        id: saved.id,
        username: saved.username,
        email: saved.email,
        first_name: saved.first_name,
        last_name: saved.last_name,
    }))
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    let access_token = token_service.issue_access_token(&user)?;
    let refresh_token = token_service.issue_refresh_token(&user)?;

    let cookie = refresh_cookie(
        refresh_token,
        token_service.refresh_max_age_seconds(),
        state.cookie_secure,
    );

    tracing::info!(username = %user.username, "User logged in");

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        access_token,
        is_admin: user.is_staff,
    }))
}

/// POST /auth/refresh/
///
/// Reads the refresh token from the cookie; 401 when the cookie is missing
/// or the token is malformed, expired, or blacklisted.
pub async fn refresh(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let cookie = req
        .cookie(REFRESH_COOKIE)
        .ok_or(AuthError::MissingRefreshToken)?;

    let claims = token_service.decode_refresh_token(cookie.value())?;

    if state.blacklist.is_revoked(claims.jti).await? {
        return Err(AuthError::InvalidToken("token is blacklisted".to_string()).into());
    }

    // The user must still exist for the token to mean anything
    let user = state
        .users
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| AuthError::InvalidToken("unknown user".to_string()))?;

    let access_token = token_service.issue_access_token(&user)?;

    Ok(HttpResponse::Ok().json(RefreshResponse { access_token }))
}

/// POST /auth/logout/
///
/// Blacklists the presented refresh token. A token that is already
/// blacklisted gets the same 401 as any other invalid token.
pub async fn logout(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let cookie = req
        .cookie(REFRESH_COOKIE)
        .ok_or(AuthError::MissingRefreshToken)?;

    let claims = token_service.decode_refresh_token(cookie.value())?;

    if state.blacklist.is_revoked(claims.jti).await? {
        return Err(AuthError::InvalidToken("token is blacklisted".to_string()).into());
    }

    let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
    // Two concurrent logouts can both pass the is_revoked check; the loser
    // hits the jti primary key and gets the same 401 as a replayed token.
    let revoked = state.blacklist.revoke(claims.jti, expires_at).await;
    revoked.map_err(|e| match e {
        RepoError::Constraint(_) => {
            AuthError::InvalidToken("token is blacklisted".to_string()).into()
        }
        other => AppError::from(other),
    })?;

    let mut removal = Cookie::new(REFRESH_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::Ok().cookie(removal).json(MessageResponse {
        detail: "Logged out.".to_string(),
    }))
}
