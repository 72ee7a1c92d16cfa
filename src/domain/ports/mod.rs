use crate::domain::models::{
    hotel::{Hotel, HotelImage}, room::Room, booking::{Booking, BookingFilter, BookingStatus},
    page::Page, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now". Validation never reads ambient system time directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError>;
    async fn list(&self, search: Option<&str>) -> Result<Vec<Hotel>, AppError>;
    async fn list_first(&self, limit: i64) -> Result<Vec<Hotel>, AppError>;
    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    async fn add_image(&self, image: &HotelImage) -> Result<HotelImage, AppError>;
    async fn list_images(&self, hotel_id: &str) -> Result<Vec<HotelImage>, AppError>;
    async fn delete_image(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    /// All rooms, ordered by hotel name then room name.
    async fn list_all(&self) -> Result<Vec<Room>, AppError>;
    async fn list_by_hotel(&self, hotel_id: &str) -> Result<Vec<Room>, AppError>;
    async fn search(&self, hotel_id: Option<&str>, search: Option<&str>) -> Result<Vec<Room>, AppError>;
    async fn update(&self, room: &Room) -> Result<Room, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking unless an active booking on the same room overlaps it.
    /// Check and insert happen in one atomic unit; `None` means the range was taken.
    async fn create_if_available(&self, booking: &Booking) -> Result<Option<Booking>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;
    /// Active bookings whose `[check_in, check_out)` intersects the given range.
    async fn list_active_overlapping(&self, check_in: NaiveDate, check_out: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus, updated_at: DateTime<Utc>) -> Result<Booking, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn create(&self, page: &Page) -> Result<Page, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Page>, AppError>;
    async fn find_child_by_slug(&self, parent_id: Option<&str>, slug: &str) -> Result<Option<Page>, AppError>;
    async fn list_children(&self, parent_id: Option<&str>) -> Result<Vec<Page>, AppError>;
    async fn list_all(&self) -> Result<Vec<Page>, AppError>;
    async fn count_for_hotel(&self, hotel_id: &str) -> Result<i64, AppError>;
    async fn update(&self, page: &Page) -> Result<Page, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
