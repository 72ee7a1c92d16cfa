use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tera::Context;
use tower_cookies::Cookies;
use crate::api::dtos::responses::RoomResponse;
use crate::domain::models::room::Room;
use crate::domain::services::booking_service::BookingForm;
use crate::error::{AppError, ValidationErrors};
use crate::state::AppState;
use super::flash::{self, Flash};
use super::{render, ErrorPage, OrErrorPage};

pub async fn room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    cookies: Cookies,
) -> Result<Html<String>, ErrorPage> {
    let notice = flash::take(&cookies);
    room_page(&state, &room_id, &BookingForm::default(), &ValidationErrors::new(), None, notice)
        .await
        .or_error_page(&state)
}

pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    cookies: Cookies,
    Form(form): Form<BookingForm>,
) -> Result<Response, ErrorPage> {
    match state.booking_service.create_booking(&room_id, &form).await {
        Ok(_) => {
            flash::set(&cookies, Flash::BookingRequested);
            Ok(Redirect::to(&format!("/room/{}/", room_id)).into_response())
        }
        Err(AppError::Validation(errors)) => {
            let page = room_page(&state, &room_id, &form, &errors, None, None).await.or_error_page(&state)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(AppError::BookingConflict) => {
            let message = AppError::BookingConflict.public_message();
            let page = room_page(&state, &room_id, &form, &ValidationErrors::new(), Some(&message), None)
                .await
                .or_error_page(&state)?;
            Ok((StatusCode::CONFLICT, page).into_response())
        }
        Err(other) => Err::<Response, _>(other).or_error_page(&state),
    }
}

async fn room_page(
    state: &AppState,
    room_id: &str,
    form: &BookingForm,
    errors: &ValidationErrors,
    form_error: Option<&str>,
    notice: Option<Flash>,
) -> Result<Html<String>, AppError> {
    let room: Room = state.room_repo.find_by_id(room_id).await?
        .ok_or_else(|| AppError::NotFound("Room not found".into()))?;
    let hotel = state.hotel_repo.find_by_id(&room.hotel_id).await?
        .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;

    let mut context = Context::new();
    context.insert("hotel", &hotel);
    context.insert("room", &RoomResponse::from(room));
    context.insert("form", form);
    context.insert("errors", &errors.by_field());
    context.insert("form_error", &form_error);
    context.insert("flash", &notice.map(Flash::message));
    context.insert("today", &state.clock.today().to_string());

    render(&state.templates, "room_detail.html", &context)
}
