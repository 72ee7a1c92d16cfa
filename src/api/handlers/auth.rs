use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::LoginRequest;
use crate::api::extractors::auth::ACCESS_COOKIE;
use crate::domain::models::auth::{AuthResponse, UserProfile};
use crate::domain::services::auth_service::ACCESS_TOKEN_MINUTES;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service.authenticate(&payload.username, &payload.password).await
        .inspect_err(|_| warn!("Failed login attempt for '{}'", payload.username))?;

    let (access_jwt, csrf_token) = state.auth_service.issue_token(&user)?;

    set_access_cookie(&cookies, &access_jwt, state.config.secure_cookies);

    info!("Administrator logged in: {}", user.id);

    Ok(Json(AuthResponse {
        csrf_token,
        user: UserProfile {
            id: user.id,
            username: user.username,
        },
    }))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build((ACCESS_COOKIE, "")).path("/").into());

    info!("Administrator logged out");

    Ok(StatusCode::OK)
}

fn set_access_cookie(cookies: &Cookies, access: &str, secure: bool) {
    let mut access_c = Cookie::new(ACCESS_COOKIE, access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(secure);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(ACCESS_TOKEN_MINUTES));
    cookies.add(access_c);
}
