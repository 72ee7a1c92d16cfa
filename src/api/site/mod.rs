//! Server-rendered guest pages.

pub mod content;
pub mod flash;
pub mod listing;
pub mod room;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tera::{Context, Tera};
use crate::error::AppError;
use crate::state::AppState;

pub fn render(templates: &Tera, name: &str, context: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(templates.render(name, context)?))
}

/// An `AppError` raised by an HTML route, shown as a themed error page.
pub struct ErrorPage {
    error: AppError,
    templates: Arc<Tera>,
}

pub trait OrErrorPage<T> {
    fn or_error_page(self, state: &AppState) -> Result<T, ErrorPage>;
}

impl<T> OrErrorPage<T> for Result<T, AppError> {
    fn or_error_page(self, state: &AppState) -> Result<T, ErrorPage> {
        self.map_err(|error| ErrorPage { error, templates: state.templates.clone() })
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        self.error.log();
        let status = self.error.status_code();

        let mut context = Context::new();
        context.insert("status", &status.as_u16());
        context.insert("message", &self.error.public_message());

        match self.templates.render("error.html", &context) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Error page could not be rendered: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
