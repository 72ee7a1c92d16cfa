use crate::domain::models::booking::BookingStatus;
use crate::domain::models::page::{ContentBlock, PageKind};
use crate::error::{AppError, ValidationErrors};
use serde::Deserialize;
use validator::Validate;

/// Validates an already trimmed payload, reporting fields in `order`.
fn checked<T: Validate>(payload: T, order: &[&str]) -> Result<T, AppError> {
    match payload.validate() {
        Ok(()) => Ok(payload),
        Err(e) => Err(AppError::Validation(ValidationErrors::ordered(e, order))),
    }
}

fn trim_owned(value: String) -> String {
    value.trim().to_string()
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `check_in` / `check_out` filter shared by the HTML listings and the JSON API.
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RoomListQuery {
    pub hotel_id: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub room_id: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HotelRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required (up to 200 characters)."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 300, message = "Address is required (up to 300 characters)."))]
    pub address: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HotelImageRequest {
    #[validate(length(min = 1, max = 500, message = "Image URL is required."))]
    pub image_url: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Caption is limited to 200 characters."))]
    pub caption: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative."))]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoomRequest {
    pub hotel_id: String,
    #[validate(length(min = 1, max = 200, message = "Name is required (up to 200 characters)."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Square metres.
    #[validate(range(min = 0.0, max = 9999.99, message = "Area must be between 0 and 9999.99."))]
    pub area: f64,
    /// Decimal price, e.g. `3000.00`.
    #[validate(range(min = 0.0, max = 99999999.99, message = "Price must be between 0 and 99999999.99."))]
    pub price_per_night: f64,
    pub photo_url: Option<String>,
}

impl HotelRequest {
    pub fn cleaned(self) -> Result<Self, AppError> {
        checked(Self {
            name: trim_owned(self.name),
            description: self.description,
            address: trim_owned(self.address),
        }, &["name", "address"])
    }
}

impl HotelImageRequest {
    pub fn cleaned(self) -> Result<Self, AppError> {
        checked(Self {
            image_url: trim_owned(self.image_url),
            caption: trim_owned(self.caption),
            sort_order: self.sort_order,
        }, &["image_url", "caption", "sort_order"])
    }
}

impl RoomRequest {
    pub fn cleaned(self) -> Result<Self, AppError> {
        checked(Self {
            hotel_id: trim_owned(self.hotel_id),
            name: trim_owned(self.name),
            description: self.description,
            area: self.area,
            price_per_night: self.price_per_night,
            photo_url: self.photo_url.map(trim_owned).filter(|u| !u.is_empty()),
        }, &["name", "area", "price_per_night"])
    }

    pub fn price_cents(&self) -> i64 {
        (self.price_per_night * 100.0).round() as i64
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PageRequest {
    pub parent_id: Option<String>,
    pub slug: String,
    #[validate(length(min = 1, max = 200, message = "Title is required (up to 200 characters)."))]
    pub title: String,
    pub kind: PageKind,
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub body: Vec<ContentBlock>,
    #[serde(default)]
    pub sort_order: i32,
}

impl PageRequest {
    pub fn cleaned(self) -> Result<Self, AppError> {
        checked(Self {
            parent_id: self.parent_id.map(trim_owned).filter(|p| !p.is_empty()),
            slug: trim_owned(self.slug),
            title: trim_owned(self.title),
            kind: self.kind,
            hotel_id: self.hotel_id.map(trim_owned).filter(|h| !h.is_empty()),
            address: self.address,
            phone: trim_owned(self.phone),
            email: trim_owned(self.email),
            body: self.body,
            sort_order: self.sort_order,
        }, &["title"])
    }
}
