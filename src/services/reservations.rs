//! Reservation service: rentals, returns and late fees

use std::sync::Arc;

use chrono::{Days, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        Reservation, ReservationRequest, ReservationStatus, ReservationView, ReturnRequest,
    },
    repository::{BookCatalog, ReservationStore, UserDirectory},
    services::{locks::KeyedLocks, pricing::PricingPolicy},
};

#[derive(Clone)]
pub struct ReservationsService {
    users: Arc<dyn UserDirectory>,
    books: Arc<dyn BookCatalog>,
    reservations: Arc<dyn ReservationStore>,
    pricing: PricingPolicy,
    book_locks: KeyedLocks,
    reservation_locks: KeyedLocks,
}

impl ReservationsService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        books: Arc<dyn BookCatalog>,
        reservations: Arc<dyn ReservationStore>,
        pricing: PricingPolicy,
    ) -> Self {
        Self {
            users,
            books,
            reservations,
            pricing,
            book_locks: KeyedLocks::new(),
            reservation_locks: KeyedLocks::new(),
        }
    }

    /// Create a new reservation (rent one copy of a book)
    pub async fn create_reservation(&self, request: ReservationRequest) -> AppResult<ReservationView> {
        request.validate()?;

        let user = self
            .users
            .resolve(request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", request.user_id)))?;

        // Availability check, insert and decrement happen under the book's lock
        let _guard = self.book_locks.lock(request.book_external_id).await;

        let book = self
            .books
            .find_by_external_id(request.book_external_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Book with id {} not found", request.book_external_id))
            })?;

        if !book.is_available() {
            tracing::warn!(book = book.external_id, user = user.id, "Reservation refused: no copies available");
            return Err(AppError::Availability(format!(
                "No copies available for book {}",
                book.external_id
            )));
        }

        let daily_rate = self.pricing.daily_rate(book.price);
        let total_fee = self.pricing.total_fee(daily_rate, request.rental_days);
        let expected_return_date = request
            .start_date
            .checked_add_days(Days::new(request.rental_days as u64))
            .ok_or_else(|| AppError::Validation("Return date is out of range".to_string()))?;

        let reservation = Reservation {
            id: None,
            user_id: user.id,
            book_external_id: book.external_id,
            rental_days: request.rental_days,
            start_date: request.start_date,
            expected_return_date,
            actual_return_date: None,
            daily_rate,
            total_fee,
            late_fee: None,
            status: ReservationStatus::Active,
            created_at: Utc::now(),
        };

        let saved = self.reservations.save(reservation).await?;
        self.books.decrease_available(book.external_id).await?;

        tracing::info!(
            reservation = ?saved.id,
            book = book.external_id,
            user = user.id,
            total_fee = %saved.total_fee,
            "Reservation created"
        );

        Ok(ReservationView::try_from(saved)?
            .with_user_name(user.name)
            .with_book_title(book.title))
    }

    /// Return a rented book, charging a late fee when past the expected date
    pub async fn return_book(&self, reservation_id: i64, request: ReturnRequest) -> AppResult<ReservationView> {
        let _guard = self.reservation_locks.lock(reservation_id).await;

        let mut reservation = self.find(reservation_id).await?;

        if reservation.is_returned() {
            tracing::warn!(reservation = reservation_id, "Return refused: already returned");
            return Err(AppError::Conflict(format!(
                "Reservation {} has already been returned",
                reservation_id
            )));
        }

        let book = self
            .books
            .find_by_external_id(reservation.book_external_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Book with id {} not found", reservation.book_external_id))
            })?;

        let late_fee = reservation
            .days_late(request.return_date)
            .map(|days| self.pricing.late_fee(book.price, days));
        reservation.mark_returned(request.return_date, late_fee);

        let saved = self.reservations.save(reservation).await?;
        self.books.increase_available(book.external_id).await?;

        tracing::info!(
            reservation = reservation_id,
            book = book.external_id,
            late_fee = ?saved.late_fee,
            "Book returned"
        );

        Ok(ReservationView::try_from(saved)?.with_book_title(book.title))
    }

    pub async fn get_reservation_by_id(&self, id: i64) -> AppResult<ReservationView> {
        ReservationView::try_from(self.find(id).await?)
    }

    pub async fn get_all_reservations(&self) -> AppResult<Vec<ReservationView>> {
        to_views(self.reservations.find_all().await?)
    }

    pub async fn get_reservations_by_user_id(&self, user_id: i64) -> AppResult<Vec<ReservationView>> {
        to_views(self.reservations.find_by_user_id(user_id).await?)
    }

    pub async fn get_active_reservations(&self) -> AppResult<Vec<ReservationView>> {
        to_views(self.reservations.find_by_status(ReservationStatus::Active).await?)
    }

    async fn find(&self, id: i64) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }
}

fn to_views(reservations: Vec<Reservation>) -> AppResult<Vec<ReservationView>> {
    reservations.into_iter().map(ReservationView::try_from).collect()
}
