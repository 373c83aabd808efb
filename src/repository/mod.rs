//! Repository layer: collaborator interfaces and their PostgreSQL implementations

pub mod books;
pub mod reservations;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, Reservation, ReservationStatus, User},
};

/// Read access to library members
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn resolve(&self, user_id: i64) -> AppResult<Option<User>>;
}

/// Book lookup and availability counter
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalog: Send + Sync {
    async fn find_by_external_id(&self, external_id: i64) -> AppResult<Option<Book>>;

    /// Take one copy off the shelf. Fails if none is available.
    async fn decrease_available(&self, external_id: i64) -> AppResult<()>;

    /// Put one copy back. Fails if it would exceed the stock.
    async fn increase_available(&self, external_id: i64) -> AppResult<()>;
}

/// Reservation persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert when `id` is `None`, update otherwise. Returns the stored record.
    async fn save(&self, reservation: Reservation) -> AppResult<Reservation>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>>;

    async fn find_all(&self) -> AppResult<Vec<Reservation>>;

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Reservation>>;

    async fn find_by_status(&self, status: ReservationStatus) -> AppResult<Vec<Reservation>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub reservations: reservations::ReservationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database ping failed: {:?}", e);
                AppError::Unavailable("Database unreachable".to_string())
            })?;
        Ok(())
    }
}
