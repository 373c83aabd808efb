//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Rental API",
        version = "0.1.0",
        description = "Book rental reservations, returns and late fees"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Reservations
        reservations::list_reservations,
        reservations::list_active_reservations,
        reservations::get_reservation,
        reservations::get_user_reservations,
        reservations::create_reservation,
        reservations::return_book,
    ),
    components(
        schemas(
            crate::models::ReservationRequest,
            crate::models::ReturnRequest,
            crate::models::ReservationView,
            crate::models::ReservationStatus,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reservations", description = "Book rentals and returns")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
