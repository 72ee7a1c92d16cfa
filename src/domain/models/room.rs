use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub name: String,
    pub description: String,
    /// Floor area in square metres.
    pub area: f64,
    /// Nightly price in minor currency units.
    pub price_per_night_cents: i64,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewRoomParams {
    pub hotel_id: String,
    pub name: String,
    pub description: String,
    pub area: f64,
    pub price_per_night_cents: i64,
    pub photo_url: Option<String>,
}

impl Room {
    pub fn new(params: NewRoomParams, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            hotel_id: params.hotel_id,
            name: params.name,
            description: params.description,
            area: round_hundredths(params.area),
            price_per_night_cents: params.price_per_night_cents,
            photo_url: params.photo_url,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn price_display(&self) -> String {
        format_cents(self.price_per_night_cents)
    }

    pub fn area_display(&self) -> String {
        format!("{:.2}", self.area)
    }
}

pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
