//! Data models for Veranda

pub mod booking;
pub mod customer;
pub mod enums;
pub mod invoice;
pub mod payment;
pub mod room;

// Re-export commonly used types
pub use booking::{Booking, BookingCharge, BookingDetails, CreateBooking};
pub use customer::Customer;
pub use enums::{BookingStatus, InvoiceStatus, PaymentStatus, RoomStatus};
pub use invoice::Invoice;
pub use payment::Payment;
pub use room::Room;
