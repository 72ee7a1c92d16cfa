use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use crate::domain::models::booking::Booking;
use crate::domain::models::hotel::Hotel;
use crate::domain::models::room::Room;
use crate::domain::ports::{BookingRepository, HotelRepository, RoomRepository};
use crate::error::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open stay `[check_in, check_out)`: the check-out day is free for the next guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, AppError> {
        if check_out <= check_in {
            return Err(AppError::validation("check_out", "Check-out date must be later than check-in date."));
        }
        Ok(Self { check_in, check_out })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }
}

pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation(field, "Enter a valid date (YYYY-MM-DD)."))
}

/// Reads an optional filter range. A missing or blank bound disables filtering.
pub fn parse_date_range(check_in: Option<&str>, check_out: Option<&str>) -> Result<Option<DateRange>, AppError> {
    let check_in = check_in.map(str::trim).filter(|s| !s.is_empty());
    let check_out = check_out.map(str::trim).filter(|s| !s.is_empty());

    match (check_in, check_out) {
        (Some(raw_in), Some(raw_out)) => {
            let check_in = parse_date("check_in", raw_in)?;
            let check_out = parse_date("check_out", raw_out)?;
            DateRange::new(check_in, check_out).map(Some)
        }
        _ => Ok(None),
    }
}

/// Rooms holding at least one active booking that intersects `range`.
pub fn occupied_room_ids<'a>(bookings: &'a [Booking], range: &DateRange) -> HashSet<&'a str> {
    bookings.iter()
        .filter(|b| b.status.is_active() && range.overlaps(b.check_in, b.check_out))
        .map(|b| b.room_id.as_str())
        .collect()
}

pub fn available_rooms(rooms: Vec<Room>, bookings: &[Booking], range: Option<&DateRange>) -> Vec<Room> {
    let Some(range) = range else {
        return rooms;
    };

    let occupied = occupied_room_ids(bookings, range);
    rooms.into_iter()
        .filter(|room| !occupied.contains(room.id.as_str()))
        .collect()
}

/// A hotel stays in the result only if it still owns a free room for the range.
pub fn available_hotels(hotels: Vec<Hotel>, rooms: &[Room], bookings: &[Booking], range: Option<&DateRange>) -> Vec<Hotel> {
    let Some(range) = range else {
        return hotels;
    };

    let occupied = occupied_room_ids(bookings, range);
    let hotels_with_free_rooms: HashSet<&str> = rooms.iter()
        .filter(|room| !occupied.contains(room.id.as_str()))
        .map(|room| room.hotel_id.as_str())
        .collect();

    hotels.into_iter()
        .filter(|hotel| hotels_with_free_rooms.contains(hotel.id.as_str()))
        .collect()
}

pub struct AvailabilityService {
    hotel_repo: Arc<dyn HotelRepository>,
    room_repo: Arc<dyn RoomRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl AvailabilityService {
    pub fn new(
        hotel_repo: Arc<dyn HotelRepository>,
        room_repo: Arc<dyn RoomRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self { hotel_repo, room_repo, booking_repo }
    }

    pub async fn hotels(&self, range: Option<&DateRange>) -> Result<Vec<Hotel>, AppError> {
        let hotels = self.hotel_repo.list(None).await?;
        let Some(range) = range else {
            return Ok(hotels);
        };

        let rooms = self.room_repo.list_all().await?;
        let bookings = self.booking_repo.list_active_overlapping(range.check_in(), range.check_out()).await?;
        Ok(available_hotels(hotels, &rooms, &bookings, Some(range)))
    }

    pub async fn rooms_of_hotel(&self, hotel_id: &str, range: Option<&DateRange>) -> Result<Vec<Room>, AppError> {
        let rooms = self.room_repo.list_by_hotel(hotel_id).await?;
        let Some(range) = range else {
            return Ok(rooms);
        };

        let bookings = self.booking_repo.list_active_overlapping(range.check_in(), range.check_out()).await?;
        Ok(available_rooms(rooms, &bookings, Some(range)))
    }
}
