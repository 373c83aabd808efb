//! Reservation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{ReservationRequest, ReservationView, ReturnRequest},
    AppState,
};

/// List all reservations
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "All reservations", body = Vec<ReservationView>)
    )
)]
pub async fn list_reservations(State(state): State<AppState>) -> AppResult<Json<Vec<ReservationView>>> {
    let reservations = state.services.reservations.get_all_reservations().await?;
    Ok(Json(reservations))
}

/// List reservations that have not been returned yet
#[utoipa::path(
    get,
    path = "/reservations/active",
    tag = "reservations",
    responses(
        (status = 200, description = "Active reservations", body = Vec<ReservationView>)
    )
)]
pub async fn list_active_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let reservations = state.services.reservations.get_active_reservations().await?;
    Ok(Json(reservations))
}

/// Get a reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation", body = ReservationView),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationView>> {
    let reservation = state.services.reservations.get_reservation_by_id(id).await?;
    Ok(Json(reservation))
}

/// Get reservations of a user
#[utoipa::path(
    get,
    path = "/users/{id}/reservations",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's reservations", body = Vec<ReservationView>)
    )
)]
pub async fn get_user_reservations(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let reservations = state
        .services
        .reservations
        .get_reservations_by_user_id(user_id)
        .await?;
    Ok(Json(reservations))
}

/// Create a new reservation (rent a book)
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationView),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "User or book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "No copies available", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationView>)> {
    let reservation = state.services.reservations.create_reservation(request).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Return a rented book
#[utoipa::path(
    post,
    path = "/reservations/{id}/return",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = ReservationView),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<ReservationView>> {
    let reservation = state.services.reservations.return_book(id, request).await?;
    Ok(Json(reservation))
}
