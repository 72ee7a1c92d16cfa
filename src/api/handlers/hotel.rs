use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{AvailabilityQuery, HotelImageRequest, HotelRequest, SearchQuery};
use crate::api::dtos::responses::{HotelDetailResponse, RoomResponse};
use crate::domain::models::hotel::{Hotel, HotelImage};
use crate::domain::services::availability::parse_date_range;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = parse_date_range(query.check_in.as_deref(), query.check_out.as_deref())?;
    let hotels = state.availability_service.hotels(range.as_ref()).await?;
    Ok(Json(hotels))
}

pub async fn get_hotel(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = find_hotel(&state, &hotel_id).await?;
    let images = state.hotel_repo.list_images(&hotel.id).await?;
    let rooms = state.room_repo.list_by_hotel(&hotel.id).await?;

    Ok(Json(HotelDetailResponse {
        hotel,
        images,
        rooms: rooms.into_iter().map(RoomResponse::from).collect(),
    }))
}

pub async fn list_hotel_rooms(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = find_hotel(&state, &hotel_id).await?;
    let range = parse_date_range(query.check_in.as_deref(), query.check_out.as_deref())?;
    let rooms = state.availability_service.rooms_of_hotel(&hotel.id, range.as_ref()).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect::<Vec<_>>()))
}

// --- Administration ---

pub async fn admin_list_hotels(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hotels = state.hotel_repo.list(query.q.as_deref()).await?;
    Ok(Json(hotels))
}

pub async fn create_hotel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<HotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.cleaned()?;

    let hotel = Hotel::new(
        payload.name,
        payload.description,
        payload.address,
        state.clock.now(),
    );
    let created = state.hotel_repo.create(&hotel).await?;
    info!(hotel_id = %created.id, "Hotel created");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn admin_get_hotel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(find_hotel(&state, &hotel_id).await?))
}

pub async fn update_hotel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hotel_id): Path<String>,
    Json(payload): Json<HotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.cleaned()?;

    let mut hotel = find_hotel(&state, &hotel_id).await?;
    hotel.name = payload.name;
    hotel.description = payload.description;
    hotel.address = payload.address;
    hotel.updated_at = state.clock.now();

    Ok(Json(state.hotel_repo.update(&hotel).await?))
}

pub async fn delete_hotel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pages = state.page_repo.count_for_hotel(&hotel_id).await?;
    if pages > 0 {
        return Err(AppError::Conflict(format!(
            "Hotel is shown on {} content page(s); remove or repoint them first", pages
        )));
    }

    state.hotel_repo.delete(&hotel_id).await?;
    info!(hotel_id = %hotel_id, "Hotel deleted with its rooms and bookings");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_images(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = find_hotel(&state, &hotel_id).await?;
    Ok(Json(state.hotel_repo.list_images(&hotel.id).await?))
}

pub async fn add_image(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hotel_id): Path<String>,
    Json(payload): Json<HotelImageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.cleaned()?;
    let hotel = find_hotel(&state, &hotel_id).await?;

    let image = HotelImage::new(
        hotel.id,
        payload.image_url,
        payload.caption,
        payload.sort_order,
        state.clock.now(),
    );
    Ok((StatusCode::CREATED, Json(state.hotel_repo.add_image(&image).await?)))
}

pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(image_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.hotel_repo.delete_image(&image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_hotel(state: &AppState, hotel_id: &str) -> Result<Hotel, AppError> {
    state.hotel_repo.find_by_id(hotel_id).await?
        .ok_or_else(|| AppError::NotFound("Hotel not found".into()))
}
