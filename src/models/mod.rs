//! Data models for the book rental server

pub mod book;
pub mod reservation;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use reservation::{Reservation, ReservationRequest, ReservationStatus, ReservationView, ReturnRequest};
pub use user::User;
