use crate::domain::{models::hotel::{Hotel, HotelImage}, ports::HotelRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteHotelRepo {
    pool: SqlitePool,
}

impl SqliteHotelRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for SqliteHotelRepo {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            "INSERT INTO hotels (id, name, description, address, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&hotel.id).bind(&hotel.name).bind(&hotel.description).bind(&hotel.address)
            .bind(hotel.created_at).bind(hotel.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Hotel>, AppError> {
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(q) => {
                let pattern = format!("%{}%", q);
                sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE name LIKE ? OR address LIKE ? ORDER BY name ASC")
                    .bind(&pattern).bind(&pattern)
                    .fetch_all(&self.pool).await.map_err(AppError::Database)
            }
            None => sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn list_first(&self, limit: i64) -> Result<Vec<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY name ASC LIMIT ?").bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            "UPDATE hotels SET name = ?, description = ?, address = ?, updated_at = ? WHERE id = ? RETURNING *"
        )
            .bind(&hotel.name).bind(&hotel.description).bind(&hotel.address).bind(hotel.updated_at)
            .bind(&hotel.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Hotel not found".into())); }
        Ok(())
    }

    async fn add_image(&self, image: &HotelImage) -> Result<HotelImage, AppError> {
        sqlx::query_as::<_, HotelImage>(
            "INSERT INTO hotel_images (id, hotel_id, image_url, caption, sort_order, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&image.id).bind(&image.hotel_id).bind(&image.image_url).bind(&image.caption)
            .bind(image.sort_order).bind(image.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_images(&self, hotel_id: &str) -> Result<Vec<HotelImage>, AppError> {
        sqlx::query_as::<_, HotelImage>("SELECT * FROM hotel_images WHERE hotel_id = ? ORDER BY sort_order ASC, created_at ASC")
            .bind(hotel_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_image(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hotel_images WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Image not found".into())); }
        Ok(())
    }
}
