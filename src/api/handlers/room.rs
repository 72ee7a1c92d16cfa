use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{RoomListQuery, RoomRequest};
use crate::api::dtos::responses::RoomResponse;
use crate::domain::models::room::{round_hundredths, NewRoomParams, Room};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(RoomResponse::from(find_room(&state, &room_id).await?)))
}

pub async fn admin_list_rooms(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<RoomListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.search(query.hotel_id.as_deref(), query.q.as_deref()).await?;
    Ok(Json(rooms))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<RoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.cleaned()?;
    ensure_hotel(&state, &payload.hotel_id).await?;

    let room = Room::new(NewRoomParams {
        price_per_night_cents: payload.price_cents(),
        hotel_id: payload.hotel_id,
        name: payload.name,
        description: payload.description,
        area: payload.area,
        photo_url: payload.photo_url,
    }, state.clock.now());

    let created = state.room_repo.create(&room).await?;
    info!(room_id = %created.id, hotel_id = %created.hotel_id, "Room created");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn admin_get_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(find_room(&state, &room_id).await?))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_id): Path<String>,
    Json(payload): Json<RoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.cleaned()?;
    let mut room = find_room(&state, &room_id).await?;
    if payload.hotel_id != room.hotel_id {
        ensure_hotel(&state, &payload.hotel_id).await?;
    }

    room.price_per_night_cents = payload.price_cents();
    room.hotel_id = payload.hotel_id;
    room.name = payload.name;
    room.description = payload.description;
    room.area = round_hundredths(payload.area);
    room.photo_url = payload.photo_url;
    room.updated_at = state.clock.now();

    Ok(Json(state.room_repo.update(&room).await?))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.room_repo.delete(&room_id).await?;
    info!(room_id = %room_id, "Room deleted with its bookings");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_room(state: &AppState, room_id: &str) -> Result<Room, AppError> {
    state.room_repo.find_by_id(room_id).await?
        .ok_or_else(|| AppError::NotFound("Room not found".into()))
}

async fn ensure_hotel(state: &AppState, hotel_id: &str) -> Result<(), AppError> {
    match state.hotel_repo.find_by_id(hotel_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::validation("hotel_id", "Hotel does not exist.")),
    }
}
