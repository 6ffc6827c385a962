//! API handlers for Veranda REST endpoints

pub mod bookings;
pub mod customers;
pub mod health;
pub mod invoices;
pub mod openapi;
pub mod payments;
pub mod rooms;
pub mod stats;
