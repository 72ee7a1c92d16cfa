use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, Method},
};
use crate::state::AppState;
use crate::domain::models::auth::Claims;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub const ACCESS_COOKIE: &str = "access_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Authenticated administrator. Mutating requests must echo the CSRF token
/// from the access token in the `X-CSRF-Token` header.
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or_else(|| AppError::InternalWithMsg("cookie layer missing".into()))?;

        let access_token = cookies.get(ACCESS_COOKIE)
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify_token(&access_token)?;

        let method = &parts.method;
        if method != Method::GET && method != Method::HEAD && method != Method::OPTIONS {
            let csrf_header_val = parts.headers.get(CSRF_HEADER)
                .ok_or_else(|| AppError::Forbidden("Missing CSRF token".into()))?
                .to_str()
                .map_err(|_| AppError::Forbidden("Invalid CSRF token".into()))?;

            if csrf_header_val != claims.csrf_token {
                return Err(AppError::Forbidden("Invalid CSRF token".into()));
            }
        }

        Span::current().record("user_id", &claims.sub);

        Ok(AdminUser(claims))
    }
}
