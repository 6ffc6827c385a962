//! Payment model and related types. Payments are append-only: no update
//! or delete path exists once a row is written.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Payment model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i32,
    pub booking_id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// cash | card | transfer | ... free-form gateway tag
    pub method: String,
    pub reference: Option<String>,
    /// Effectively always "completed"
    pub status: String,
    pub currency: String,
    pub paid_at: DateTime<Utc>,
}

/// Record payment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPayment {
    pub booking_id: i32,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub reference: Option<String>,
}

/// Result of recording a payment, including the derived booking totals
/// and the synchronized invoice state
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentRecorded {
    pub payment: Payment,
    #[schema(value_type = String)]
    pub total_paid: Decimal,
    #[schema(value_type = String)]
    pub due_amount: Decimal,
    pub payment_status: String,
    pub invoice: super::invoice::Invoice,
}
