//! Booking model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{customer::Customer, payment::Payment, room::Room};

/// Booking model from database. Paid amount is intentionally absent:
/// it is always derived from the booking's payments.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub booking_reference: String,
    pub customer_id: i32,
    pub room_id: i32,
    /// pending | confirmed | checked_in | checked_out | cancelled
    pub status: String,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    #[schema(value_type = String)]
    pub base_amount: Decimal,
    #[schema(value_type = String)]
    pub discount_amount: Decimal,
    #[schema(value_type = String)]
    pub subtotal_amount: Decimal,
    #[schema(value_type = String)]
    pub tax_amount: Decimal,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Additional charge applied to a booking after creation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingCharge {
    pub id: i32,
    pub booking_id: i32,
    pub description: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Booking with joined room, customer and payment history for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub room: Room,
    pub customer: Customer,
    pub payments: Vec<Payment>,
    pub charges: Vec<BookingCharge>,
    #[schema(value_type = String)]
    pub paid_amount: Decimal,
    #[schema(value_type = String)]
    pub due_amount: Decimal,
    /// unpaid | partial | paid, derived from payments
    pub payment_status: String,
}

/// Guest information supplied with a new booking; used to upsert the
/// customer record (keyed by email when present)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GuestInfo {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub address: Option<String>,
    pub id_number: Option<String>,
}

/// A payment supplied inline with booking creation
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingPaymentInput {
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Defaults to "cash"
    pub method: Option<String>,
    pub reference: Option<String>,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    #[validate(nested)]
    pub guest: GuestInfo,
    #[validate(length(min = 1, message = "room_number is required"))]
    pub room_number: String,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    #[schema(value_type = Option<String>)]
    pub base_amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub discount_amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub tax_amount: Option<Decimal>,
    /// Defaults to 0 when absent
    #[schema(value_type = Option<String>)]
    pub total_amount: Option<Decimal>,
    /// Initial status; defaults to "confirmed"
    pub status: Option<String>,
    #[serde(default)]
    pub payments: Vec<BookingPaymentInput>,
    pub notes: Option<String>,
}

/// Booking list query
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingQuery {
    pub status: Option<String>,
    pub room_id: Option<i32>,
    pub customer_id: Option<i32>,
}

/// Add charge request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCharge {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
}
