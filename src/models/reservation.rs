//! Reservation (book rental) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Reservation status. `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Active,
    Returned,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "ACTIVE",
            ReservationStatus::Returned => "RETURNED",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(ReservationStatus::Active),
            "RETURNED" => Ok(ReservationStatus::Returned),
            other => Err(AppError::Internal(format!("Unknown reservation status '{}'", other))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation record.
///
/// `id` is `None` until the store has persisted the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: Option<i64>,
    pub user_id: i64,
    pub book_external_id: i64,
    pub rental_days: i32,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub daily_rate: Decimal,
    pub total_fee: Decimal,
    pub late_fee: Option<Decimal>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_returned(&self) -> bool {
        self.status == ReservationStatus::Returned
    }

    /// Whole days between the expected and the given return date, if late
    pub fn days_late(&self, returned_on: NaiveDate) -> Option<i64> {
        let days = (returned_on - self.expected_return_date).num_days();
        (days > 0).then_some(days)
    }

    pub fn mark_returned(&mut self, returned_on: NaiveDate, late_fee: Option<Decimal>) {
        self.status = ReservationStatus::Returned;
        self.actual_return_date = Some(returned_on);
        self.late_fee = late_fee;
    }
}

/// Raw reservation row, status kept as text
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: i64,
    pub user_id: i64,
    pub book_external_id: i64,
    pub rental_days: i32,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub daily_rate: Decimal,
    pub total_fee: Decimal,
    pub late_fee: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> AppResult<Self> {
        Ok(Reservation {
            id: Some(row.id),
            user_id: row.user_id,
            book_external_id: row.book_external_id,
            rental_days: row.rental_days,
            start_date: row.start_date,
            expected_return_date: row.expected_return_date,
            actual_return_date: row.actual_return_date,
            daily_rate: row.daily_rate,
            total_fee: row.total_fee,
            late_fee: row.late_fee,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

/// Create reservation request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ReservationRequest {
    /// User ID
    pub user_id: i64,
    /// Catalog identifier of the book
    pub book_external_id: i64,
    /// Number of rental days (at least 1)
    #[validate(range(min = 1, message = "rental_days must be at least 1"))]
    pub rental_days: i32,
    /// First day of the rental
    pub start_date: NaiveDate,
}

/// Return request
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ReturnRequest {
    /// Day the book was actually returned
    pub return_date: NaiveDate,
}

/// Reservation as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReservationView {
    pub id: i64,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub book_external_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    pub rental_days: i32,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub daily_rate: Decimal,
    pub total_fee: Decimal,
    pub late_fee: Option<Decimal>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl ReservationView {
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn with_book_title(mut self, title: impl Into<String>) -> Self {
        self.book_title = Some(title.into());
        self
    }
}

impl TryFrom<Reservation> for ReservationView {
    type Error = AppError;

    fn try_from(r: Reservation) -> AppResult<Self> {
        let id = r
            .id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Internal("Reservation has no store-assigned id".to_string()))?;

        Ok(ReservationView {
            id,
            user_id: r.user_id,
            user_name: None,
            book_external_id: r.book_external_id,
            book_title: None,
            rental_days: r.rental_days,
            start_date: r.start_date,
            expected_return_date: r.expected_return_date,
            actual_return_date: r.actual_return_date,
            daily_rate: r.daily_rate,
            total_fee: r.total_fee,
            late_fee: r.late_fee,
            status: r.status,
            created_at: r.created_at,
        })
    }
}
