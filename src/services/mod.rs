//! Business logic services

pub mod bookings;
pub mod customers;
pub mod invoices;
pub mod payments;
pub mod rooms;
pub mod stats;

use crate::{config::BillingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub rooms: rooms::RoomsService,
    pub customers: customers::CustomersService,
    pub bookings: bookings::BookingsService,
    pub payments: payments::PaymentsService,
    pub invoices: invoices::InvoicesService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, billing: BillingConfig) -> Self {
        Self {
            rooms: rooms::RoomsService::new(repository.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone(), billing.clone()),
            payments: payments::PaymentsService::new(repository.clone(), billing.clone()),
            invoices: invoices::InvoicesService::new(repository.clone(), billing),
            stats: stats::StatsService::new(repository),
        }
    }
}
