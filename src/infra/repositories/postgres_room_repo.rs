use crate::domain::{models::room::Room, ports::RoomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresRoomRepo {
    pool: PgPool,
}

impl PostgresRoomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepo {
    async fn create(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, hotel_id, name, description, area, price_per_night_cents, photo_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&room.id).bind(&room.hotel_id).bind(&room.name).bind(&room.description)
            .bind(room.area).bind(room.price_per_night_cents).bind(&room.photo_url)
            .bind(room.created_at).bind(room.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT r.* FROM rooms r JOIN hotels h ON h.id = r.hotel_id ORDER BY h.name ASC, r.name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_hotel(&self, hotel_id: &str) -> Result<Vec<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE hotel_id = $1 ORDER BY name ASC")
            .bind(hotel_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn search(&self, hotel_id: Option<&str>, search: Option<&str>) -> Result<Vec<Room>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT r.* FROM rooms r JOIN hotels h ON h.id = r.hotel_id WHERE TRUE");
        if let Some(hotel_id) = hotel_id {
            qb.push(" AND r.hotel_id = ").push_bind(hotel_id.to_string());
        }
        if let Some(q) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", q);
            qb.push(" AND (r.name ILIKE ").push_bind(pattern.clone())
                .push(" OR h.name ILIKE ").push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY h.name ASC, r.name ASC");

        qb.build_query_as::<Room>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET hotel_id = $1, name = $2, description = $3, area = $4, price_per_night_cents = $5, photo_url = $6, updated_at = $7
             WHERE id = $8
             RETURNING *"
        )
            .bind(&room.hotel_id).bind(&room.name).bind(&room.description).bind(room.area).bind(room.price_per_night_cents)
            .bind(&room.photo_url).bind(room.updated_at)
            .bind(&room.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Room not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Room not found".into())); }
        Ok(())
    }
}
