//! Room model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Room model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Room {
    pub id: i32,
    pub room_number: String,
    pub room_type: String,
    pub capacity: i32,
    #[schema(value_type = String)]
    pub rate_per_night: Decimal,
    /// available | occupied | maintenance
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoom {
    #[validate(length(min = 1, message = "room_number is required"))]
    pub room_number: String,
    #[validate(length(min = 1, message = "room_type is required"))]
    pub room_type: String,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: i32,
    #[schema(value_type = String)]
    pub rate_per_night: Decimal,
    pub notes: Option<String>,
}

/// Update room request; absent fields are left unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoom {
    pub room_type: Option<String>,
    pub capacity: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub rate_per_night: Option<Decimal>,
    pub notes: Option<String>,
}

/// Room availability query (`?checkin_date=...&checkout_date=...`)
#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityQuery {
    pub checkin_date: chrono::NaiveDate,
    pub checkout_date: chrono::NaiveDate,
}
