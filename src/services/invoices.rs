//! Invoice service

use crate::{
    config::BillingConfig,
    error::AppResult,
    models::invoice::Invoice,
    repository::Repository,
};

#[derive(Clone)]
pub struct InvoicesService {
    repository: Repository,
    billing: BillingConfig,
}

impl InvoicesService {
    pub fn new(repository: Repository, billing: BillingConfig) -> Self {
        Self { repository, billing }
    }

    pub async fn list(&self) -> AppResult<Vec<Invoice>> {
        self.repository.invoices.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Invoice> {
        self.repository.invoices.get_by_id(id).await
    }

    pub async fn get_by_booking(&self, booking_id: i32) -> AppResult<Invoice> {
        self.repository.invoices.get_by_booking(booking_id).await
    }

    /// Issue an invoice for a booking that is missing one
    pub async fn create_for_booking(&self, booking_id: i32) -> AppResult<Invoice> {
        self.repository
            .invoices
            .create_for_booking(booking_id, &self.billing.currency)
            .await
    }
}
