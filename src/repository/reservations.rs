//! Reservations repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{reservation::ReservationRow, Reservation, ReservationStatus},
    repository::ReservationStore,
};

const COLUMNS: &str = "id, user_id, book_external_id, rental_days, start_date, \
    expected_return_date, actual_return_date, daily_rate, total_fee, late_fee, status, created_at";

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn insert(&self, r: &Reservation) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
            INSERT INTO reservations (
                user_id, book_external_id, rental_days, start_date, expected_return_date,
                actual_return_date, daily_rate, total_fee, late_fee, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(r.user_id)
        .bind(r.book_external_id)
        .bind(r.rental_days)
        .bind(r.start_date)
        .bind(r.expected_return_date)
        .bind(r.actual_return_date)
        .bind(r.daily_rate)
        .bind(r.total_fee)
        .bind(r.late_fee)
        .bind(r.status.as_str())
        .bind(r.created_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Only active reservations are updated: a returned one is final.
    async fn update(&self, id: i64, r: &Reservation) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
            UPDATE reservations
            SET actual_return_date = $2, late_fee = $3, status = $4
            WHERE id = $1 AND status = 'ACTIVE'
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(r.actual_return_date)
        .bind(r.late_fee)
        .bind(r.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(self.missing_or_returned(id).await?),
        }
    }

    async fn missing_or_returned(&self, id: i64) -> AppResult<AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reservations WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(if exists {
            AppError::Conflict(format!("Reservation {} has already been returned", id))
        } else {
            AppError::NotFound(format!("Reservation with id {} not found", id))
        })
    }

    fn collect(rows: Vec<ReservationRow>) -> AppResult<Vec<Reservation>> {
        rows.into_iter().map(Reservation::try_from).collect()
    }
}

#[async_trait]
impl ReservationStore for ReservationsRepository {
    async fn save(&self, reservation: Reservation) -> AppResult<Reservation> {
        match reservation.id {
            None => self.insert(&reservation).await,
            Some(id) => self.update(id, &reservation).await,
        }
    }

    /// Get reservation by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Reservation::try_from)
        .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {COLUMNS} FROM reservations ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Self::collect(rows)
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Self::collect(rows)
    }

    async fn find_by_status(&self, status: ReservationStatus) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE status = $1 ORDER BY id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        Self::collect(rows)
    }
}
