//! Shared domain enums (room, booking, payment and invoice statuses)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// Room status as stored in `rooms.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(RoomStatus::Available),
            "occupied" => Some(RoomStatus::Occupied),
            "maintenance" => Some(RoomStatus::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle status as stored in `bookings.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "checked_in" => Some(BookingStatus::CheckedIn),
            "checked_out" => Some(BookingStatus::CheckedOut),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Transition table for the booking lifecycle. Checked-out and cancelled
    /// are terminal; everything not listed here is rejected.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, CheckedIn)
                | (Pending, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (CheckedIn, CheckedOut)
        )
    }

    /// Whether a booking in this status occupies its room for
    /// conflict-detection purposes.
    pub fn blocks_room(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::CheckedIn)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Derived payment completeness of a booking. Never persisted; always
/// recomputed from the sum of completed payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// paid if `paid >= total`, partial if `0 < paid < total`, else unpaid.
    pub fn derive(paid: Decimal, total: Decimal) -> Self {
        if paid <= Decimal::ZERO {
            PaymentStatus::Unpaid
        } else if paid >= total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InvoiceStatus
// ---------------------------------------------------------------------------

/// Invoice status as stored in `invoices.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Issued,
    Partial,
    Paid,
}

impl InvoiceStatus {
    /// paid if nothing is due, partial once any amount has been received,
    /// issued otherwise.
    pub fn derive(paid: Decimal, due: Decimal) -> Self {
        if due <= Decimal::ZERO {
            InvoiceStatus::Paid
        } else if paid > Decimal::ZERO {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Issued
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn payment_status_thresholds() {
        assert_eq!(PaymentStatus::derive(dec(0), dec(1000)), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::derive(dec(600), dec(1000)), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::derive(dec(1000), dec(1000)), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::derive(dec(1200), dec(1000)), PaymentStatus::Paid);
    }

    #[test]
    fn payment_status_zero_total() {
        // Free stay with a recorded payment still counts as paid
        assert_eq!(PaymentStatus::derive(dec(50), dec(0)), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::derive(dec(0), dec(0)), PaymentStatus::Unpaid);
    }

    #[test]
    fn invoice_status_thresholds() {
        assert_eq!(InvoiceStatus::derive(dec(0), dec(400)), InvoiceStatus::Issued);
        assert_eq!(InvoiceStatus::derive(dec(600), dec(400)), InvoiceStatus::Partial);
        assert_eq!(InvoiceStatus::derive(dec(1000), dec(0)), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::derive(dec(1200), dec(-200)), InvoiceStatus::Paid);
    }

    #[test]
    fn transition_table_allows_normal_lifecycle() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(CheckedOut));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        // Walk-in: check in straight from pending
        assert!(Pending.can_transition_to(CheckedIn));
    }

    #[test]
    fn transition_table_rejects_terminal_exits() {
        use BookingStatus::*;
        assert!(!CheckedOut.can_transition_to(Confirmed));
        assert!(!CheckedOut.can_transition_to(CheckedIn));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!CheckedIn.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Confirmed));
    }

    #[test]
    fn status_strings_round_trip() {
        for s in ["pending", "confirmed", "checked_in", "checked_out", "cancelled"] {
            assert_eq!(BookingStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(BookingStatus::parse("paid").is_none());
    }
}
