//! Business logic services

pub mod locks;
pub mod pricing;
pub mod reservations;

use std::sync::Arc;

use crate::{config::PricingConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub reservations: reservations::ReservationsService,
    repository: Option<Repository>,
}

impl Services {
    /// Create all services backed by the given repository
    pub fn new(repository: Repository, pricing: PricingConfig) -> Self {
        let reservations = reservations::ReservationsService::new(
            Arc::new(repository.users.clone()),
            Arc::new(repository.books.clone()),
            Arc::new(repository.reservations.clone()),
            pricing.into(),
        );

        Self {
            reservations,
            repository: Some(repository),
        }
    }

    /// Services over caller-provided collaborators, with no database behind them
    pub fn with_reservations(reservations: reservations::ReservationsService) -> Self {
        Self {
            reservations,
            repository: None,
        }
    }

    /// Check that backing storage is reachable
    pub async fn ping(&self) -> AppResult<()> {
        match &self.repository {
            Some(repository) => repository.ping().await,
            None => Ok(()),
        }
    }
}
