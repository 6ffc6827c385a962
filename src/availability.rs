//! Room availability calculator.
//!
//! Pure, side-effect-free occupancy logic shared by the availability
//! endpoints and mirrored by the SQL conflict predicate in the bookings
//! repository. A booking occupies the half-open interval
//! `[checkin_date, checkout_date)`: the checkout day itself is free, so a
//! room vacated in the morning can be let again the same night.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Room;

/// Minimal view of a booking as needed for occupancy checks. Fields are
/// optional because rows can arrive from partially populated sources;
/// incomplete entries are skipped rather than treated as fatal.
#[derive(Debug, Clone)]
pub struct BookingWindow {
    pub booking_id: i32,
    pub room_number: Option<String>,
    pub status: Option<String>,
    pub checkin_date: Option<NaiveDate>,
    pub checkout_date: Option<NaiveDate>,
}

/// Partition of a room list for a given date. Disjoint and exhaustive by
/// construction: every room lands in exactly one bucket.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomPartition {
    pub available: Vec<Room>,
    pub occupied: Vec<Room>,
    pub maintenance: Vec<Room>,
}

/// True when `date` falls inside `[checkin, checkout)`.
pub fn is_date_occupied(date: NaiveDate, checkin: NaiveDate, checkout: NaiveDate) -> bool {
    checkin <= date && date < checkout
}

/// Whether a booking in the given status counts toward occupancy.
/// Cancelled, pending and checked-out bookings never block a room.
pub fn is_booking_status_active(status: &str) -> bool {
    matches!(
        status.to_ascii_lowercase().as_str(),
        "confirmed" | "checked_in" | "checked-in" | "active"
    )
}

/// Room numbers occupied on `date` by any active booking.
pub fn occupied_rooms_on(bookings: &[BookingWindow], date: NaiveDate) -> HashSet<String> {
    let mut occupied = HashSet::new();
    for booking in bookings {
        let (room, checkin, checkout) = match (
            booking.room_number.as_ref(),
            booking.checkin_date,
            booking.checkout_date,
        ) {
            (Some(room), Some(ci), Some(co)) => (room, ci, co),
            _ => {
                tracing::warn!(
                    booking_id = booking.booking_id,
                    "skipping booking with missing room/date fields"
                );
                continue;
            }
        };

        let active = booking
            .status
            .as_deref()
            .map(is_booking_status_active)
            .unwrap_or(false);

        if active && is_date_occupied(date, checkin, checkout) {
            occupied.insert(room.clone());
        }
    }
    occupied
}

/// Split `rooms` into maintenance / occupied / available buckets for `date`.
/// Maintenance wins over occupancy: a room under maintenance stays in the
/// maintenance bucket even if a booking covers the date.
pub fn categorize_rooms_on(
    rooms: &[Room],
    bookings: &[BookingWindow],
    date: NaiveDate,
) -> RoomPartition {
    let occupied_numbers = occupied_rooms_on(bookings, date);

    let mut partition = RoomPartition {
        available: Vec::new(),
        occupied: Vec::new(),
        maintenance: Vec::new(),
    };

    for room in rooms {
        if room.status == "maintenance" {
            partition.maintenance.push(room.clone());
        } else if occupied_numbers.contains(&room.room_number) {
            partition.occupied.push(room.clone());
        } else {
            partition.available.push(room.clone());
        }
    }

    partition
}

/// True when no active, non-excluded booking on `room_number` overlaps the
/// requested half-open range.
pub fn is_room_available_for_range(
    room_number: &str,
    req_checkin: NaiveDate,
    req_checkout: NaiveDate,
    bookings: &[BookingWindow],
    exclude_booking_id: Option<i32>,
) -> bool {
    for booking in bookings {
        if Some(booking.booking_id) == exclude_booking_id {
            continue;
        }
        if booking.room_number.as_deref() != Some(room_number) {
            continue;
        }
        let active = booking
            .status
            .as_deref()
            .map(is_booking_status_active)
            .unwrap_or(false);
        if !active {
            continue;
        }
        let (Some(checkin), Some(checkout)) = (booking.checkin_date, booking.checkout_date)
        else {
            continue;
        };

        // Half-open overlap: [a, b) and [c, d) intersect iff a < d && b > c
        if req_checkin < checkout && req_checkout > checkin {
            return false;
        }
    }
    true
}

/// Validate a requested stay: check-in must not be in the past and
/// checkout must be strictly after check-in.
pub fn validate_booking_dates(
    checkin: NaiveDate,
    checkout: NaiveDate,
    today: NaiveDate,
) -> Result<(), String> {
    if checkin < today {
        return Err("check-in date cannot be in the past".to_string());
    }
    if checkout <= checkin {
        return Err("checkout date must be after check-in date".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(
        id: i32,
        room: &str,
        status: &str,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> BookingWindow {
        BookingWindow {
            booking_id: id,
            room_number: Some(room.to_string()),
            status: Some(status.to_string()),
            checkin_date: Some(checkin),
            checkout_date: Some(checkout),
        }
    }

    fn room(number: &str, status: &str) -> Room {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        Room {
            id: 0,
            room_number: number.to_string(),
            room_type: "standard".to_string(),
            capacity: 2,
            rate_per_night: Decimal::from(100),
            status: status.to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn checkout_day_is_free() {
        let checkin = date(2025, 10, 17);
        let checkout = date(2025, 10, 20);

        assert!(!is_date_occupied(date(2025, 10, 16), checkin, checkout));
        assert!(is_date_occupied(date(2025, 10, 17), checkin, checkout));
        assert!(is_date_occupied(date(2025, 10, 18), checkin, checkout));
        assert!(is_date_occupied(date(2025, 10, 19), checkin, checkout));
        assert!(!is_date_occupied(date(2025, 10, 20), checkin, checkout));
    }

    #[test]
    fn active_statuses() {
        assert!(is_booking_status_active("confirmed"));
        assert!(is_booking_status_active("CONFIRMED"));
        assert!(is_booking_status_active("checked_in"));
        assert!(is_booking_status_active("checked-in"));
        assert!(is_booking_status_active("active"));
        assert!(!is_booking_status_active("pending"));
        assert!(!is_booking_status_active("cancelled"));
        assert!(!is_booking_status_active("checked_out"));
    }

    #[test]
    fn occupied_rooms_skips_malformed_entries() {
        let mut broken = window(1, "101", "confirmed", date(2025, 10, 17), date(2025, 10, 20));
        broken.checkout_date = None;

        let bookings = vec![
            broken,
            window(2, "102", "confirmed", date(2025, 10, 17), date(2025, 10, 20)),
            window(3, "103", "cancelled", date(2025, 10, 17), date(2025, 10, 20)),
        ];

        let occupied = occupied_rooms_on(&bookings, date(2025, 10, 18));
        assert_eq!(occupied.len(), 1);
        assert!(occupied.contains("102"));
    }

    #[test]
    fn partition_is_disjoint_and_exhaustive() {
        let rooms = vec![
            room("101", "available"),
            room("102", "available"),
            room("103", "maintenance"),
            room("104", "occupied"),
        ];
        let bookings = vec![
            window(1, "101", "confirmed", date(2025, 10, 17), date(2025, 10, 20)),
            // Maintenance wins even with a covering booking
            window(2, "103", "checked_in", date(2025, 10, 17), date(2025, 10, 20)),
        ];

        let partition = categorize_rooms_on(&rooms, &bookings, date(2025, 10, 18));

        assert_eq!(
            partition.available.len() + partition.occupied.len() + partition.maintenance.len(),
            rooms.len()
        );
        let occupied: Vec<_> = partition.occupied.iter().map(|r| &r.room_number).collect();
        assert_eq!(occupied, vec!["101"]);
        let maint: Vec<_> = partition.maintenance.iter().map(|r| &r.room_number).collect();
        assert_eq!(maint, vec!["103"]);
        // No booking covers 102 or 104 on that date
        let available: Vec<_> = partition.available.iter().map(|r| &r.room_number).collect();
        assert_eq!(available, vec!["102", "104"]);
    }

    #[test]
    fn range_overlap_rejects_contained_stay() {
        let bookings = vec![window(
            1,
            "101",
            "confirmed",
            date(2025, 10, 17),
            date(2025, 10, 20),
        )];

        assert!(!is_room_available_for_range(
            "101",
            date(2025, 10, 18),
            date(2025, 10, 19),
            &bookings,
            None,
        ));
    }

    #[test]
    fn range_starting_on_checkout_day_is_accepted() {
        let bookings = vec![window(
            1,
            "101",
            "confirmed",
            date(2025, 10, 17),
            date(2025, 10, 20),
        )];

        assert!(is_room_available_for_range(
            "101",
            date(2025, 10, 20),
            date(2025, 10, 22),
            &bookings,
            None,
        ));
        // And ending on the check-in day is fine too
        assert!(is_room_available_for_range(
            "101",
            date(2025, 10, 15),
            date(2025, 10, 17),
            &bookings,
            None,
        ));
    }

    #[test]
    fn range_check_honors_exclusion_and_other_rooms() {
        let bookings = vec![window(
            1,
            "101",
            "confirmed",
            date(2025, 10, 17),
            date(2025, 10, 20),
        )];

        // Rebooking the same stay while editing booking 1 itself
        assert!(is_room_available_for_range(
            "101",
            date(2025, 10, 17),
            date(2025, 10, 20),
            &bookings,
            Some(1),
        ));
        // A different room is unaffected
        assert!(is_room_available_for_range(
            "102",
            date(2025, 10, 18),
            date(2025, 10, 19),
            &bookings,
            None,
        ));
    }

    #[test]
    fn date_validation() {
        let today = date(2025, 10, 15);

        assert!(validate_booking_dates(date(2025, 10, 20), date(2025, 10, 22), today).is_ok());
        // Equal dates rejected
        assert!(validate_booking_dates(date(2025, 10, 20), date(2025, 10, 20), today).is_err());
        // Inverted range rejected
        assert!(validate_booking_dates(date(2025, 10, 22), date(2025, 10, 20), today).is_err());
        // Past check-in rejected
        assert!(validate_booking_dates(date(2025, 10, 10), date(2025, 10, 12), today).is_err());
        // Same-day check-in allowed
        assert!(validate_booking_dates(today, date(2025, 10, 16), today).is_ok());
    }
}
