//! Invoice model. One invoice per booking, issued at booking-creation time
//! and resynchronized whenever a payment is recorded.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Invoice model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Invoice {
    pub id: i32,
    pub invoice_reference: String,
    pub booking_id: i32,
    pub customer_id: i32,
    pub issue_date: NaiveDate,
    #[schema(value_type = String)]
    pub total: Decimal,
    #[schema(value_type = String)]
    pub paid: Decimal,
    #[schema(value_type = String)]
    pub due: Decimal,
    pub currency: String,
    /// issued | partial | paid
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
