use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::models::hotel::{Hotel, HotelImage};
use crate::domain::models::page::Page;
use crate::domain::models::room::Room;
use serde::Serialize;

/// Room with decimal fields rendered to two places, as shown to guests.
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub hotel_id: String,
    pub name: String,
    pub description: String,
    pub area: String,
    pub price_per_night: String,
    pub photo_url: Option<String>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            area: room.area_display(),
            price_per_night: room.price_display(),
            id: room.id,
            hotel_id: room.hotel_id,
            name: room.name,
            description: room.description,
            photo_url: room.photo_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HotelDetailResponse {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub images: Vec<HotelImage>,
    pub rooms: Vec<RoomResponse>,
}

#[derive(Debug, Serialize)]
pub struct BookingCreatedResponse {
    pub id: String,
    pub status: BookingStatus,
}

impl From<Booking> for BookingCreatedResponse {
    fn from(booking: Booking) -> Self {
        Self { id: booking.id, status: booking.status }
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    #[serde(flatten)]
    pub page: Page,
    pub path: String,
}
