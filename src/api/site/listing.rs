use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;
use tera::Context;
use crate::api::dtos::requests::AvailabilityQuery;
use crate::api::dtos::responses::RoomResponse;
use crate::domain::services::availability::{parse_date_range, DateRange};
use crate::error::{AppError, ValidationErrors};
use crate::state::AppState;
use super::{render, ErrorPage, OrErrorPage};

pub async fn hotel_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<(StatusCode, Html<String>), ErrorPage> {
    hotel_list_page(&state, query).await.or_error_page(&state)
}

pub async fn hotel_rooms(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<(StatusCode, Html<String>), ErrorPage> {
    hotel_rooms_page(&state, &hotel_id, query).await.or_error_page(&state)
}

async fn hotel_list_page(state: &AppState, query: AvailabilityQuery) -> Result<(StatusCode, Html<String>), AppError> {
    let mut context = filter_context(&query);
    let (range, status) = read_filter(&query, &mut context)?;

    let hotels = state.availability_service.hotels(range.as_ref()).await?;
    context.insert("hotels", &hotels);

    Ok((status, render(&state.templates, "hotel_list.html", &context)?))
}

async fn hotel_rooms_page(state: &AppState, hotel_id: &str, query: AvailabilityQuery) -> Result<(StatusCode, Html<String>), AppError> {
    let hotel = state.hotel_repo.find_by_id(hotel_id).await?
        .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;

    let mut context = filter_context(&query);
    let (range, status) = read_filter(&query, &mut context)?;

    let rooms: Vec<RoomResponse> = state.availability_service.rooms_of_hotel(&hotel.id, range.as_ref()).await?
        .into_iter()
        .map(RoomResponse::from)
        .collect();
    let images = state.hotel_repo.list_images(&hotel.id).await?;

    context.insert("hotel", &hotel);
    context.insert("images", &images);
    context.insert("rooms", &rooms);

    Ok((status, render(&state.templates, "room_list.html", &context)?))
}

fn filter_context(query: &AvailabilityQuery) -> Context {
    let mut context = Context::new();
    context.insert("check_in", query.check_in.as_deref().unwrap_or_default());
    context.insert("check_out", query.check_out.as_deref().unwrap_or_default());
    context
}

/// An invalid range is shown next to the unfiltered listing with status 400.
fn read_filter(query: &AvailabilityQuery, context: &mut Context) -> Result<(Option<DateRange>, StatusCode), AppError> {
    match parse_date_range(query.check_in.as_deref(), query.check_out.as_deref()) {
        Ok(range) => {
            context.insert("filter_errors", &ValidationErrors::new().by_field());
            Ok((range, StatusCode::OK))
        }
        Err(AppError::Validation(errors)) => {
            context.insert("filter_errors", &errors.by_field());
            Ok((None, StatusCode::BAD_REQUEST))
        }
        Err(other) => Err(other),
    }
}
