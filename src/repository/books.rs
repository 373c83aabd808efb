//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::Book,
    repository::BookCatalog,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn exists(&self, external_id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE external_id = $1)")
                .bind(external_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl BookCatalog for BooksRepository {
    async fn find_by_external_id(&self, external_id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT external_id, title, price, stock_quantity, available_quantity
            FROM books
            WHERE external_id = $1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn decrease_available(&self, external_id: i64) -> AppResult<()> {
        // Single guarded update: the counter never drops below zero
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available_quantity = available_quantity - 1
            WHERE external_id = $1 AND available_quantity > 0
            "#,
        )
        .bind(external_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if !self.exists(external_id).await? {
                return Err(AppError::NotFound(format!("Book with id {} not found", external_id)));
            }
            return Err(AppError::Availability(format!(
                "No copies available for book {}",
                external_id
            )));
        }

        Ok(())
    }

    async fn increase_available(&self, external_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available_quantity = available_quantity + 1
            WHERE external_id = $1 AND available_quantity < stock_quantity
            "#,
        )
        .bind(external_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if !self.exists(external_id).await? {
                return Err(AppError::NotFound(format!("Book with id {} not found", external_id)));
            }
            return Err(AppError::Conflict(format!(
                "Available quantity of book {} already equals its stock",
                external_id
            )));
        }

        Ok(())
    }
}
