//! Book model as seen through the catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record from the catalog.
///
/// `available_quantity` counts copies not currently on loan and stays within
/// `[0, stock_quantity]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub external_id: i64,
    pub title: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub available_quantity: i32,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }
}
