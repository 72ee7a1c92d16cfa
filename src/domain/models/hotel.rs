use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(name: String, description: String, address: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Gallery photo of a hotel. Galleries are shown by `sort_order`, then upload time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct HotelImage {
    pub id: String,
    pub hotel_id: String,
    pub image_url: String,
    pub caption: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl HotelImage {
    pub fn new(hotel_id: String, image_url: String, caption: String, sort_order: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            hotel_id,
            image_url,
            caption,
            sort_order,
            created_at: now,
        }
    }
}
