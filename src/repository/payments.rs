//! Payments repository. Payment rows are append-only; recording one
//! recomputes the booking's paid/due totals from scratch and synchronizes
//! the invoice inside the same transaction.

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::Booking,
        enums::{InvoiceStatus, PaymentStatus},
        invoice::Invoice,
        payment::{Payment, PaymentRecorded},
    },
    repository::generate_reference,
};

#[derive(Clone)]
pub struct PaymentsRepository {
    pool: Pool<Postgres>,
}

impl PaymentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List payments for a booking, oldest first
    pub async fn list_by_booking(&self, booking_id: i32) -> AppResult<Vec<Payment>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE id = $1)")
                .bind(booking_id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                booking_id
            )));
        }

        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_id = $1 ORDER BY paid_at",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    /// Record a payment against a booking and resynchronize its invoice.
    /// Totals are recomputed from all completed payments each time, so a
    /// replayed call converges on the same paid/due/status.
    pub async fn record(
        &self,
        booking_id: i32,
        amount: Decimal,
        method: &str,
        reference: Option<&str>,
        currency: &str,
    ) -> AppResult<PaymentRecorded> {
        let mut tx = self.pool.begin().await?;

        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Booking with id {} not found", booking_id))
                })?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (booking_id, amount, method, reference, status, currency)
            VALUES ($1, $2, $3, $4, 'completed', $5)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(amount)
        .bind(method)
        .bind(reference)
        .bind(currency)
        .fetch_one(&mut *tx)
        .await?;

        let total_paid: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE booking_id = $1 AND status = 'completed'",
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        let due_amount = booking.total_amount - total_paid;
        let payment_status = PaymentStatus::derive(total_paid, booking.total_amount);
        let invoice_status = InvoiceStatus::derive(total_paid, due_amount);

        let existing =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE booking_id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?;

        let invoice = match existing {
            Some(invoice) => {
                sqlx::query_as::<_, Invoice>(
                    r#"
                    UPDATE invoices
                    SET paid = $1, due = $2, status = $3, updated_at = NOW()
                    WHERE id = $4
                    RETURNING *
                    "#,
                )
                .bind(total_paid)
                .bind(due_amount)
                .bind(invoice_status.as_str())
                .bind(invoice.id)
                .fetch_one(&mut *tx)
                .await?
            }
            // Bookings imported without an invoice get one on first payment
            None => {
                sqlx::query_as::<_, Invoice>(
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
                .bind(total_paid)
                .bind(due_amount)
                .bind(currency)
                .bind(invoice_status.as_str())
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        tracing::info!(
            booking_reference = %booking.booking_reference,
            amount = %amount,
            status = payment_status.as_str(),
            "payment recorded"
        );

        Ok(PaymentRecorded {
            payment,
            total_paid,
            due_amount,
            payment_status: payment_status.as_str().to_string(),
            invoice,
        })
    }
}
