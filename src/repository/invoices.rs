//! Invoices repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{booking::Booking, enums::InvoiceStatus, invoice::Invoice},
    repository::generate_reference,
};

#[derive(Clone)]
pub struct InvoicesRepository {
    pool: Pool<Postgres>,
}

impl InvoicesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List invoices, newest first
    pub async fn list(&self) -> AppResult<Vec<Invoice>> {
        let invoices =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices ORDER BY issue_date DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(invoices)
    }

    /// Get invoice by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Invoice> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invoice with id {} not found", id)))
    }

    /// Get the invoice for a booking
    pub async fn get_by_booking(&self, booking_id: i32) -> AppResult<Invoice> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No invoice for booking {}", booking_id))
            })
    }

    /// Issue an invoice for a booking that does not have one yet, carrying
    /// over the booking totals and any payments already recorded
    pub async fn create_for_booking(&self, booking_id: i32, currency: &str) -> AppResult<Invoice> {
        let mut tx = self.pool.begin().await?;

        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Booking with id {} not found", booking_id))
                })?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM invoices WHERE booking_id = $1)")
                .bind(booking_id)
                .fetch_one(&mut *tx)
                .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Booking {} already has an invoice",
                booking_id
            )));
        }

        let paid: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE booking_id = $1 AND status = 'completed'",
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;
        let due = booking.total_amount - paid;

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (
                invoice_reference, booking_id, customer_id, issue_date,
                total, paid, due, currency, status
            )
            VALUES ($1, $2, $3, CURRENT_DATE, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(generate_reference("INV"))
        .bind(booking_id)
        .bind(booking.customer_id)
        .bind(booking.total_amount)
        .bind(paid)
        .bind(due)
        .bind(currency)
        .bind(InvoiceStatus::derive(paid, due).as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(invoice)
    }
}
