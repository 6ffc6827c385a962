//! Payment recording service

use rust_decimal::Decimal;

use crate::{
    config::BillingConfig,
    error::{AppError, AppResult},
    models::payment::{Payment, PaymentRecorded, RecordPayment},
    repository::Repository,
};

#[derive(Clone)]
pub struct PaymentsService {
    repository: Repository,
    billing: BillingConfig,
}

impl PaymentsService {
    pub fn new(repository: Repository, billing: BillingConfig) -> Self {
        Self { repository, billing }
    }

    /// Record a payment and synchronize the booking's invoice
    pub async fn record(&self, req: RecordPayment) -> AppResult<PaymentRecorded> {
        let amount = req
            .amount
            .ok_or_else(|| AppError::Validation("amount is required".to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(AppError::Validation(
                "payment amount must be positive".to_string(),
            ));
        }

        self.repository
            .payments
            .record(
                req.booking_id,
                amount,
                req.method.as_deref().unwrap_or("cash"),
                req.reference.as_deref(),
                &self.billing.currency,
            )
            .await
    }

    /// Payment history for a booking
    pub async fn list_by_booking(&self, booking_id: i32) -> AppResult<Vec<Payment>> {
        self.repository.payments.list_by_booking(booking_id).await
    }
}
