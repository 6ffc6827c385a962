//! Bookings repository: the transactional heart of the server.
//!
//! Booking creation runs room lock, conflict scan, customer upsert, booking
//! insert, payment recording and invoice issuance inside one transaction.
//! The conflict predicate uses the same half-open `[checkin, checkout)`
//! convention as the pure functions in [`crate::availability`].

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    availability::BookingWindow,
    error::{AppError, AppResult},
    models::{
        booking::{
            Booking, BookingCharge, BookingDetails, BookingQuery, CreateBooking, CreateCharge,
            GuestInfo,
        },
        customer::Customer,
        enums::{BookingStatus, InvoiceStatus, PaymentStatus, RoomStatus},
        payment::Payment,
        room::Room,
    },
    repository::generate_reference,
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// List bookings with optional status/room/customer filters
    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::int4 IS NULL OR room_id = $2)
              AND ($3::int4 IS NULL OR customer_id = $3)
            ORDER BY checkin_date DESC, id DESC
            "#,
        )
        .bind(&query.status)
        .bind(query.room_id)
        .bind(query.customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// All bookings as occupancy windows (joined with room numbers), for the
    /// pure availability calculator
    pub async fn list_windows(&self) -> AppResult<Vec<BookingWindow>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.status, b.checkin_date, b.checkout_date, r.room_number
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| BookingWindow {
                booking_id: row.get("id"),
                room_number: row.get("room_number"),
                status: row.get("status"),
                checkin_date: row.get("checkin_date"),
                checkout_date: row.get("checkout_date"),
            })
            .collect())
    }

    /// Booking with joined room, customer, payments, charges and derived
    /// payment totals
    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        let booking = self.get_by_id(id).await?;

        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(booking.room_id)
            .fetch_one(&self.pool)
            .await?;

        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(booking.customer_id)
            .fetch_one(&self.pool)
            .await?;

        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_id = $1 ORDER BY paid_at",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let charges = sqlx::query_as::<_, BookingCharge>(
            "SELECT * FROM booking_charges WHERE booking_id = $1 ORDER BY created_at",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let paid_amount: Decimal = payments
            .iter()
            .filter(|p| p.status == "completed")
            .map(|p| p.amount)
            .sum();
        let due_amount = booking.total_amount - paid_amount;
        let payment_status = PaymentStatus::derive(paid_amount, booking.total_amount);

        Ok(BookingDetails {
            booking,
            room,
            customer,
            payments,
            charges,
            paid_amount,
            due_amount,
            payment_status: payment_status.as_str().to_string(),
        })
    }

    /// Create a booking atomically: lock the room, reject overlapping stays,
    /// upsert the customer, insert the booking with its payments, and issue
    /// the invoice. Any failure rolls the whole unit back.
    pub async fn create(&self, req: &CreateBooking, currency: &str) -> AppResult<BookingDetails> {
        let status = match &req.status {
            Some(s) => BookingStatus::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown booking status: {}", s)))?,
            None => BookingStatus::Confirmed,
        };

        if req.checkout_date <= req.checkin_date {
            return Err(AppError::Validation(
                "checkout date must be after check-in date".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        // Row lock on the room serializes concurrent booking attempts: the
        // second request waits here, then re-evaluates the conflict scan
        // against the committed state.
        let room =
            sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE room_number = $1 FOR UPDATE")
                .bind(&req.room_number)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Room {} not found", req.room_number)))?;

        let conflicts = sqlx::query(
            r#"
            SELECT booking_reference FROM bookings
            WHERE room_id = $1
              AND status IN ('confirmed', 'checked_in')
              AND checkin_date < $3 AND checkout_date > $2
            "#,
        )
        .bind(room.id)
        .bind(req.checkin_date)
        .bind(req.checkout_date)
        .fetch_all(&mut *tx)
        .await?;

        if !conflicts.is_empty() {
            let references: Vec<String> = conflicts
                .iter()
                .map(|row| row.get::<String, _>("booking_reference"))
                .collect();
            return Err(AppError::Conflict(format!(
                "Room {} is already booked for the requested dates (conflicts: {})",
                req.room_number,
                references.join(", ")
            )));
        }

        let customer = upsert_customer(&mut tx, &req.guest).await?;

        let base_amount = req.base_amount.unwrap_or(Decimal::ZERO);
        let discount_amount = req.discount_amount.unwrap_or(Decimal::ZERO);
        let subtotal_amount = base_amount - discount_amount;
        let tax_amount = req.tax_amount.unwrap_or(Decimal::ZERO);
        let total_amount = req.total_amount.unwrap_or(Decimal::ZERO);

        let reference = generate_reference("BK");

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                booking_reference, customer_id, room_id, status,
                checkin_date, checkout_date,
                base_amount, discount_amount, subtotal_amount, tax_amount, total_amount,
                notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&reference)
        .bind(customer.id)
        .bind(room.id)
        .bind(status.as_str())
        .bind(req.checkin_date)
        .bind(req.checkout_date)
        .bind(base_amount)
        .bind(discount_amount)
        .bind(subtotal_amount)
        .bind(tax_amount)
        .bind(total_amount)
        .bind(&req.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut payments = Vec::with_capacity(req.payments.len());
        let mut paid_amount = Decimal::ZERO;
        for input in &req.payments {
            if input.amount <= Decimal::ZERO {
                return Err(AppError::Validation(
                    "payment amount must be positive".to_string(),
                ));
            }
            let payment = sqlx::query_as::<_, Payment>(
                r#"
                INSERT INTO payments (booking_id, amount, method, reference, status, currency)
                VALUES ($1, $2, $3, $4, 'completed', $5)
                RETURNING *
                "#,
            )
            .bind(booking.id)
            .bind(input.amount)
            .bind(input.method.as_deref().unwrap_or("cash"))
            .bind(&input.reference)
            .bind(currency)
            .fetch_one(&mut *tx)
            .await?;

            paid_amount += payment.amount;
            payments.push(payment);
        }

        let payment_status = PaymentStatus::derive(paid_amount, total_amount);

        // A stay already underway marks the room occupied right away
        let today = Utc::now().date_naive();
        let room = if req.checkin_date <= today {
            sqlx::query_as::<_, Room>(
                "UPDATE rooms SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
            )
            .bind(RoomStatus::Occupied.as_str())
            .bind(room.id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            room
        };

        let due = total_amount - paid_amount;
        let invoice_status = InvoiceStatus::derive(paid_amount, due);
        sqlx::query(
            r#"
            INSERT INTO invoices (
                invoice_reference, booking_id, customer_id, issue_date,
                total, paid, due, currency, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(generate_reference("INV"))
        .bind(booking.id)
        .bind(customer.id)
        .bind(today)
        .bind(total_amount)
        .bind(paid_amount)
        .bind(due)
        .bind(currency)
        .bind(invoice_status.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            booking_reference = %booking.booking_reference,
            room_number = %req.room_number,
            "booking created"
        );

        Ok(BookingDetails {
            booking,
            room,
            customer,
            payments,
            charges: Vec::new(),
            paid_amount,
            due_amount: due,
            payment_status: payment_status.as_str().to_string(),
        })
    }

    /// Apply a status transition. Transitions outside the lifecycle table
    /// are rejected; room status follows check-in/check-out/cancel.
    pub async fn update_status(&self, id: i32, new_status: &str) -> AppResult<Booking> {
        let next = BookingStatus::parse(new_status)
            .ok_or_else(|| AppError::Validation(format!("Unknown booking status: {}", new_status)))?;

        let mut tx = self.pool.begin().await?;

        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        let current = BookingStatus::parse(&booking.status).ok_or_else(|| {
            AppError::Internal(format!("Booking {} has invalid status {}", id, booking.status))
        })?;

        if !current.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Cannot transition booking from {} to {}",
                current, next
            )));
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(next.as_str())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        match next {
            BookingStatus::CheckedIn => {
                set_room_status(&mut tx, booking.room_id, RoomStatus::Occupied).await?;
            }
            BookingStatus::CheckedOut | BookingStatus::Cancelled => {
                release_room_if_free(&mut tx, booking.room_id, booking.id).await?;
            }
            _ => {}
        }

        tx.commit().await?;

        tracing::info!(
            booking_reference = %updated.booking_reference,
            from = %current,
            to = %next,
            "booking status updated"
        );

        Ok(updated)
    }

    /// Delete a booking and its dependent rows, then reconcile room status
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        sqlx::query("DELETE FROM booking_charges WHERE booking_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM payments WHERE booking_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM invoices WHERE booking_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        release_room_if_free(&mut tx, booking.room_id, booking.id).await?;

        tx.commit().await?;

        tracing::info!(booking_reference = %booking.booking_reference, "booking deleted");

        Ok(())
    }

    /// Add an extra charge to a booking, bumping the booking total and the
    /// invoice in the same transaction so the total invariant holds.
    pub async fn add_charge(&self, booking_id: i32, req: &CreateCharge) -> AppResult<BookingCharge> {
        if req.amount <= Decimal::ZERO {
            return Err(AppError::Validation(
                "charge amount must be positive".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Booking with id {} not found", booking_id))
                })?;

        let charge = sqlx::query_as::<_, BookingCharge>(
            r#"
            INSERT INTO booking_charges (booking_id, description, amount)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(&req.description)
        .bind(req.amount)
        .fetch_one(&mut *tx)
        .await?;

        let new_total = booking.total_amount + req.amount;
        sqlx::query("UPDATE bookings SET total_amount = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_total)
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        let paid: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE booking_id = $1 AND status = 'completed'",
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;
        let due = new_total - paid;

        sqlx::query(
            r#"
            UPDATE invoices
            SET total = $1, due = $2, status = $3, updated_at = NOW()
            WHERE booking_id = $4
            "#,
        )
        .bind(new_total)
        .bind(due)
        .bind(InvoiceStatus::derive(paid, due).as_str())
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(charge)
    }
}

/// Find-or-create the customer for a booking. Keyed by email when one is
/// supplied; bookings without an email always create a fresh customer.
async fn upsert_customer(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    guest: &GuestInfo,
) -> AppResult<Customer> {
    if let Some(ref email) = guest.email {
        let existing = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(customer) = existing {
            let updated = sqlx::query_as::<_, Customer>(
                r#"
                UPDATE customers
                SET first_name = $1, last_name = $2, phone = $3,
                    address = COALESCE($4, address), id_number = COALESCE($5, id_number),
                    updated_at = NOW()
                WHERE id = $6
                RETURNING *
                "#,
            )
            .bind(&guest.first_name)
            .bind(&guest.last_name)
            .bind(&guest.phone)
            .bind(&guest.address)
            .bind(&guest.id_number)
            .bind(customer.id)
            .fetch_one(&mut **tx)
            .await?;
            return Ok(updated);
        }
    }

    let created = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (first_name, last_name, email, phone, address, id_number)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&guest.first_name)
    .bind(&guest.last_name)
    .bind(&guest.email)
    .bind(&guest.phone)
    .bind(&guest.address)
    .bind(&guest.id_number)
    .fetch_one(&mut **tx)
    .await?;

    Ok(created)
}

async fn set_room_status(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    room_id: i32,
    status: RoomStatus,
) -> AppResult<()> {
    sqlx::query("UPDATE rooms SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status.as_str())
        .bind(room_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Mark the room available unless another confirmed/checked-in booking
/// occupies it today.
async fn release_room_if_free(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    room_id: i32,
    excluded_booking_id: i32,
) -> AppResult<()> {
    let today = Utc::now().date_naive();
    let still_occupied: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM bookings
            WHERE room_id = $1 AND id <> $2
              AND status IN ('confirmed', 'checked_in')
              AND checkin_date <= $3 AND checkout_date > $3
        )
        "#,
    )
    .bind(room_id)
    .bind(excluded_booking_id)
    .bind(today)
    .fetch_one(&mut **tx)
    .await?;

    if !still_occupied {
        set_room_status(tx, room_id, RoomStatus::Available).await?;
    }
    Ok(())
}
