//! Repository layer for database operations

pub mod bookings;
pub mod customers;
pub mod invoices;
pub mod payments;
pub mod rooms;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub rooms: rooms::RoomsRepository,
    pub customers: customers::CustomersRepository,
    pub bookings: bookings::BookingsRepository,
    pub payments: payments::PaymentsRepository,
    pub invoices: invoices::InvoicesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            rooms: rooms::RoomsRepository::new(pool.clone()),
            customers: customers::CustomersRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            payments: payments::PaymentsRepository::new(pool.clone()),
            invoices: invoices::InvoicesRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Generate a human-readable reference: prefix, UTC timestamp, and a short
/// random token to disambiguate references minted in the same second.
pub(crate) fn generate_reference(prefix: &str) -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("{}-{}-{}", prefix, Utc::now().format("%Y%m%d%H%M%S"), token)
}

#[cfg(test)]
mod tests {
    use super::generate_reference;

    #[test]
    fn reference_shape() {
        let reference = generate_reference("BK");
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "BK");
        assert_eq!(parts[1].len(), 14);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
    }

    #[test]
    fn references_are_distinct() {
        let a = generate_reference("INV");
        let b = generate_reference("INV");
        assert_ne!(a, b);
    }
}
