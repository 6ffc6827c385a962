//! Booking management service

use crate::{
    config::BillingConfig,
    error::{AppError, AppResult},
    models::booking::{
        Booking, BookingCharge, BookingDetails, BookingQuery, CreateBooking, CreateCharge,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    billing: BillingConfig,
}

impl BookingsService {
    pub fn new(repository: Repository, billing: BillingConfig) -> Self {
        Self { repository, billing }
    }

    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list(query).await
    }

    /// Booking with payment history, charges and derived totals
    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        self.repository.bookings.get_details(id).await
    }

    /// Create a booking atomically (availability check, customer upsert,
    /// payments, invoice)
    pub async fn create(&self, booking: CreateBooking) -> AppResult<BookingDetails> {
        validator::Validate::validate(&booking)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository
            .bookings
            .create(&booking, &self.billing.currency)
            .await
    }

    /// Transition a booking through its lifecycle
    pub async fn update_status(&self, id: i32, status: &str) -> AppResult<Booking> {
        self.repository.bookings.update_status(id, status).await
    }

    /// Delete a booking together with its payments, charges and invoice
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.bookings.delete(id).await
    }

    /// Add an extra charge, keeping booking total and invoice in sync
    pub async fn add_charge(&self, id: i32, charge: CreateCharge) -> AppResult<BookingCharge> {
        validator::Validate::validate(&charge)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.bookings.add_charge(id, &charge).await
    }
}
