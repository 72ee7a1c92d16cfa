use crate::domain::{models::page::Page, ports::PageRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePageRepo {
    pool: SqlitePool,
}

impl SqlitePageRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageRepository for SqlitePageRepo {
    async fn create(&self, page: &Page) -> Result<Page, AppError> {
        sqlx::query_as::<_, Page>(
            "INSERT INTO pages (id, parent_id, slug, title, kind, hotel_id, address, phone, email, body, sort_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&page.id).bind(&page.parent_id).bind(&page.slug).bind(&page.title).bind(page.kind.as_str())
            .bind(&page.hotel_id).bind(&page.address).bind(&page.phone).bind(&page.email).bind(&page.body)
            .bind(page.sort_order).bind(page.created_at).bind(page.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_child_by_slug(&self, parent_id: Option<&str>, slug: &str) -> Result<Option<Page>, AppError> {
        match parent_id {
            Some(parent) => sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE parent_id = ? AND slug = ?")
                .bind(parent).bind(slug)
                .fetch_optional(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE parent_id IS NULL AND slug = ?")
                .bind(slug)
                .fetch_optional(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn list_children(&self, parent_id: Option<&str>) -> Result<Vec<Page>, AppError> {
        match parent_id {
            Some(parent) => sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE parent_id = ? ORDER BY sort_order ASC, title ASC")
                .bind(parent)
                .fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE parent_id IS NULL ORDER BY sort_order ASC, title ASC")
                .fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn list_all(&self) -> Result<Vec<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY sort_order ASC, title ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_for_hotel(&self, hotel_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pages WHERE hotel_id = ?")
            .bind(hotel_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, page: &Page) -> Result<Page, AppError> {
        sqlx::query_as::<_, Page>(
            "UPDATE pages SET parent_id = ?, slug = ?, title = ?, kind = ?, hotel_id = ?, address = ?, phone = ?, email = ?, body = ?, sort_order = ?, updated_at = ?
             WHERE id = ?
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
        let result = sqlx::query("DELETE FROM pages WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Page not found".into())); }
        Ok(())
    }
}
