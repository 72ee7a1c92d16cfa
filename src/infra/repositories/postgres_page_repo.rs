use crate::domain::{models::page::Page, ports::PageRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPageRepo {
    pool: PgPool,
}

impl PostgresPageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageRepository for PostgresPageRepo {
    async fn create(&self, page: &Page) -> Result<Page, AppError> {
        sqlx::query_as::<_, Page>(
            "INSERT INTO pages (id, parent_id, slug, title, kind, hotel_id, address, phone, email, body, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING *"
        )
            .bind(&page.id).bind(&page.parent_id).bind(&page.slug).bind(&page.title).bind(page.kind.as_str())
            .bind(&page.hotel_id).bind(&page.address).bind(&page.phone).bind(&page.email).bind(&page.body)
            .bind(page.sort_order).bind(page.created_at).bind(page.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_child_by_slug(&self, parent_id: Option<&str>, slug: &str) -> Result<Option<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE parent_id IS NOT DISTINCT FROM $1 AND slug = $2")
            .bind(parent_id).bind(slug)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_children(&self, parent_id: Option<&str>) -> Result<Vec<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE parent_id IS NOT DISTINCT FROM $1 ORDER BY sort_order ASC, title ASC")
            .bind(parent_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY sort_order ASC, title ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_for_hotel(&self, hotel_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pages WHERE hotel_id = $1")
            .bind(hotel_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, page: &Page) -> Result<Page, AppError> {
        sqlx::query_as::<_, Page>(
            "UPDATE pages SET parent_id = $1, slug = $2, title = $3, kind = $4, hotel_id = $5, address = $6, phone = $7, email = $8, body = $9, sort_order = $10, updated_at = $11
             WHERE id = $12
             RETURNING *"
        )
            .bind(&page.parent_id).bind(&page.slug).bind(&page.title).bind(page.kind.as_str()).bind(&page.hotel_id)
            .bind(&page.address).bind(&page.phone).bind(&page.email).bind(&page.body).bind(page.sort_order)
            .bind(page.updated_at)
            .bind(&page.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Page not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Page not found".into())); }
        Ok(())
    }
}
