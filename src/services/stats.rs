//! Occupancy and revenue statistics service

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::Row;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomStats {
    pub total: i64,
    pub available: i64,
    pub occupied: i64,
    pub maintenance: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingStats {
    pub total: i64,
    pub active: i64,
    pub checked_in: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueStats {
    /// Sum of all completed payments
    #[schema(value_type = String)]
    pub collected: Decimal,
    /// Sum of outstanding invoice balances
    #[schema(value_type = String)]
    pub outstanding: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Stats {
    pub rooms: RoomStats,
    pub bookings: BookingStats,
    pub revenue: RevenueStats,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_stats(&self) -> AppResult<Stats> {
        let room_row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'available') AS available,
                   COUNT(*) FILTER (WHERE status = 'occupied') AS occupied,
                   COUNT(*) FILTER (WHERE status = 'maintenance') AS maintenance
            FROM rooms
            "#,
        )
        .fetch_one(&self.repository.pool)
        .await?;

        let booking_row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status IN ('confirmed', 'checked_in')) AS active,
                   COUNT(*) FILTER (WHERE status = 'checked_in') AS checked_in
            FROM bookings
            "#,
        )
        .fetch_one(&self.repository.pool)
        .await?;

        let collected: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE status = 'completed'",
        )
        .fetch_one(&self.repository.pool)
        .await?;

        let outstanding: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(due), 0) FROM invoices WHERE due > 0",
        )
        .fetch_one(&self.repository.pool)
        .await?;

        Ok(Stats {
            rooms: RoomStats {
                total: room_row.get("total"),
                available: room_row.get("available"),
                occupied: room_row.get("occupied"),
                maintenance: room_row.get("maintenance"),
            },
            bookings: BookingStats {
                total: booking_row.get("total"),
                active: booking_row.get("active"),
                checked_in: booking_row.get("checked_in"),
            },
            revenue: RevenueStats {
                collected,
                outstanding,
            },
        })
    }
}
