use crate::domain::{models::booking::{Booking, BookingFilter, BookingStatus}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use chrono::{DateTime, NaiveDate, Utc};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_if_available(&self, booking: &Booking) -> Result<Option<Booking>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row lock on the room serialises concurrent requests for it until commit.
        let locked = sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(&booking.room_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
        if locked.is_none() {
            return Err(AppError::NotFound("Room not found".into()));
        }

        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM bookings
                 WHERE room_id = $1 AND status IN ('pending', 'confirmed') AND check_in < $2 AND check_out > $3
             )"
        )
            .bind(&booking.room_id).bind(booking.check_out).bind(booking.check_in)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if taken {
            tx.rollback().await.map_err(AppError::Database)?;
            return Ok(None);
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, room_id, guest_name, guest_email, guest_phone, check_in, check_out, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.room_id).bind(&booking.guest_name).bind(&booking.guest_email)
            .bind(&booking.guest_phone).bind(booking.check_in).bind(booking.check_out).bind(booking.status.as_str())
            .bind(booking.created_at).bind(booking.updated_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(Some(created))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT b.* FROM bookings b JOIN rooms r ON r.id = b.room_id WHERE TRUE");
        if let Some(status) = filter.status {
            qb.push(" AND b.status = ").push_bind(status.as_str());
        }
        if let Some(room_id) = &filter.room_id {
            qb.push(" AND b.room_id = ").push_bind(room_id.clone());
        }
        if let Some(q) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", q);
            qb.push(" AND (b.guest_name ILIKE ").push_bind(pattern.clone())
                .push(" OR b.guest_email ILIKE ").push_bind(pattern.clone())
                .push(" OR r.name ILIKE ").push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY b.created_at DESC");

        qb.build_query_as::<Booking>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_overlapping(&self, check_in: NaiveDate, check_out: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status IN ('pending', 'confirmed') AND check_in < $1 AND check_out > $2"
        )
            .bind(check_out).bind(check_in)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: BookingStatus, updated_at: DateTime<Utc>) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *")
            .bind(status.as_str()).bind(updated_at).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }
}
