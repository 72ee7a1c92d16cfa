use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Error)]
#[error("unknown booking status '{0}'")]
pub struct UnknownStatus(pub String);

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Active bookings occupy their room; cancelled ones do not.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Booking {
    pub fn new(params: NewBookingParams, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_id: params.room_id,
            guest_name: params.guest_name,
            guest_email: params.guest_email,
            guest_phone: params.guest_phone,
            check_in: params.check_in,
            check_out: params.check_out,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub room_id: Option<String>,
    pub search: Option<String>,
}
