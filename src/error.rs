use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::error;

pub const BOOKING_CONFLICT_MESSAGE: &str =
    "Sorry, this room is already booked for the selected dates.";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level validation failures, kept in the order they were detected.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Messages grouped by field, for form templates.
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for e in &self.0 {
            grouped.entry(e.field.clone()).or_default().push(e.message.clone());
        }
        grouped
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() { Ok(()) } else { Err(AppError::Validation(self)) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl ValidationErrors {
    /// Converts derive errors, listing `order` fields first and in that order.
    /// Fields not named in `order` follow alphabetically.
    pub fn ordered(errors: validator::ValidationErrors, order: &[&str]) -> Self {
        let rank = |field: &str| order.iter().position(|f| *f == field).unwrap_or(order.len());
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| rank(&*a.0).cmp(&rank(&*b.0)).then_with(|| a.0.cmp(&b.0)));

        let mut out = ValidationErrors::new();
        for (field, errs) in fields {
            for err in errs.iter() {
                let message = err.message.as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        ValidationErrors::ordered(errors, &[])
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Booking conflict")]
    BookingConflict,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(ValidationErrors::single(field, message))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(e) if constraint_kind(e).is_some() => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Template(_) | AppError::InternalWithMsg(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BookingConflict | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Message that is safe to show to a site visitor.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(e) => match constraint_kind(e) {
                Some(ConstraintKind::Unique) => "Resource already exists (duplicate entry)".to_string(),
                Some(ConstraintKind::ForeignKey) => "Resource is still referenced by other records".to_string(),
                None => "Internal server error".to_string(),
            },
            AppError::Template(_) | AppError::InternalWithMsg(_) => "Internal server error".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::BookingConflict => BOOKING_CONFLICT_MESSAGE.to_string(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Validation(errors) => errors.to_string(),
        }
    }

    pub fn log(&self) {
        match self {
            AppError::Database(e) if constraint_kind(e).is_none() => error!("Database error: {:?}", e),
            AppError::Template(e) => error!("Template error: {:?}", e),
            AppError::InternalWithMsg(msg) => error!("Internal error: {}", msg),
            _ => {}
        }
    }
}

enum ConstraintKind {
    Unique,
    ForeignKey,
}

fn constraint_kind(e: &sqlx::Error) -> Option<ConstraintKind> {
    let db_err = e.as_database_error()?;
    let code = db_err.code().unwrap_or_default();

    // 2067 / 1555 = SQLite unique / primary key, 23505 = PostgreSQL unique violation
    // 787 / 1811 = SQLite foreign key / ON DELETE RESTRICT, 23503 / 23001 = PostgreSQL equivalents
    match code.as_ref() {
        "2067" | "1555" | "23505" => Some(ConstraintKind::Unique),
        "787" | "1811" | "23503" | "23001" => Some(ConstraintKind::ForeignKey),
        _ => None,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();

        let body = match &self {
            AppError::Validation(errors) => json!({
                "error": "Validation failed",
                "fields": errors,
            }),
            _ => json!({ "error": self.public_message() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BookingConflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::validation("check_in", "bad").status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AppError::InternalWithMsg("boom".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_details_are_not_public() {
        let err = AppError::InternalWithMsg("connection string leaked".into());
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(AppError::BookingConflict.public_message(), BOOKING_CONFLICT_MESSAGE);
    }

    #[test]
    fn test_validation_errors_grouped_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("check_in", "required");
        errors.add("guest_name", "too long");
        errors.add("check_in", "in the past");

        let grouped = errors.by_field();
        assert_eq!(grouped["check_in"], vec!["required", "in the past"]);
        assert!(errors.has_field("guest_name"));
        assert_eq!(errors.to_string(), "check_in: required; guest_name: too long; check_in: in the past");
    }

    #[derive(validator::Validate)]
    struct Contact {
        #[validate(length(min = 1))]
        zeta: String,
        #[validate(length(min = 1))]
        alpha: String,
        #[validate(length(min = 1))]
        other: String,
    }

    #[test]
    fn test_derive_errors_follow_given_order() {
        use validator::Validate;
        let contact = Contact { zeta: String::new(), alpha: String::new(), other: String::new() };

        let ordered = ValidationErrors::ordered(contact.validate().unwrap_err(), &["zeta", "alpha"]);
        let fields: Vec<_> = ordered.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["zeta", "alpha", "other"]);

        let fallback = ValidationErrors::from(contact.validate().unwrap_err());
        let fields: Vec<_> = fallback.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["alpha", "other", "zeta"]);
    }
}
