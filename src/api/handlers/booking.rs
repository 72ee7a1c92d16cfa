use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{BookingListQuery, BookingStatusRequest};
use crate::api::dtos::responses::BookingCreatedResponse;
use crate::domain::models::booking::BookingFilter;
use crate::domain::services::booking_service::BookingForm;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(form): Json<BookingForm>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.create_booking(&room_id, &form).await?;
    Ok((StatusCode::CREATED, Json(BookingCreatedResponse::from(booking))))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = BookingFilter {
        status: query.status,
        room_id: query.room_id,
        search: query.q,
    };
    Ok(Json(state.booking_repo.list(&filter).await?))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<BookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.change_status(&booking_id, payload.status).await?;
    info!(booking_id = %booking.id, admin = %claims.username, status = %booking.status, "Booking status set by administrator");
    Ok(Json(booking))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.delete(&booking_id).await?;
    info!(booking_id = %booking_id, "Booking deleted");
    Ok(StatusCode::NO_CONTENT)
}
