//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a room with a unique number and return (id, room_number)
async fn create_room(client: &Client) -> (i64, String) {
    let number = format!("T{}", std::process::id() as u64 % 10000 + rand_suffix());

    let response = client
        .post(format!("{}/rooms", BASE_URL))
        .json(&json!({
            "room_number": number,
            "room_type": "double",
            "capacity": 2,
            "rate_per_night": "120.00"
        }))
        .send()
        .await
        .expect("Failed to create room");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse room response");
    (body["room"]["id"].as_i64().expect("No room ID"), number)
}

fn rand_suffix() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos() as u64
        % 100000
}

fn booking_payload(room_number: &str, checkin: &str, checkout: &str, total: &str) -> Value {
    json!({
        "guest": {
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "+1-555-0100"
        },
        "room_number": room_number,
        "checkin_date": checkin,
        "checkout_date": checkout,
        "total_amount": total
    })
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_room_crud() {
    let client = Client::new();
    let (room_id, _) = create_room(&client).await;

    let response = client
        .get(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await
        .expect("Failed to get room");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["room"]["status"], "available");

    // Put the room into maintenance and back
    let response = client
        .put(format!("{}/rooms/{}/status", BASE_URL, room_id))
        .json(&json!({ "status": "maintenance" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/rooms/{}/status", BASE_URL, room_id))
        .json(&json!({ "status": "available" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await
        .expect("Failed to delete room");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_double_booking_rejected_and_checkout_day_reusable() {
    let client = Client::new();
    let (room_id, room_number) = create_room(&client).await;

    // Book Oct 17-20 next year so the dates stay in the future
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload(&room_number, "2027-10-17", "2027-10-20", "300"))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let first_booking = body["booking"]["id"].as_i64().expect("No booking ID");

    // Overlapping stay rejected
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload(&room_number, "2027-10-18", "2027-10-19", "100"))
        .send()
        .await
        .expect("Failed to send overlapping booking");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);

    // Stay starting on the checkout day is accepted
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload(&room_number, "2027-10-20", "2027-10-22", "200"))
        .send()
        .await
        .expect("Failed to send back-to-back booking");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let second_booking = body["booking"]["id"].as_i64().expect("No booking ID");

    // Cleanup
    for id in [first_booking, second_booking] {
        let _ = client
            .delete(format!("{}/bookings/{}", BASE_URL, id))
            .send()
            .await;
    }
    let _ = client
        .delete(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_equal_dates_rejected() {
    let client = Client::new();
    let (room_id, room_number) = create_room(&client).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload(&room_number, "2027-10-20", "2027-10-20", "0"))
        .send()
        .await
        .expect("Failed to send booking");
    assert_eq!(response.status(), 400);

    let _ = client
        .delete(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_partial_payment_syncs_invoice() {
    let client = Client::new();
    let (room_id, room_number) = create_room(&client).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload(&room_number, "2027-11-01", "2027-11-05", "1000"))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_i64().expect("No booking ID");
    assert_eq!(body["booking"]["payment_status"], "unpaid");

    // Record a 600 payment
    let response = client
        .post(format!("{}/payments", BASE_URL))
        .json(&json!({
            "booking_id": booking_id,
            "amount": "600",
            "method": "card"
        }))
        .send()
        .await
        .expect("Failed to record payment");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["payment_status"], "partial");
    assert_eq!(body["invoice"]["status"], "partial");
    let due: f64 = body["due_amount"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("No due_amount");
    assert_eq!(due, 400.0);

    // Second payment settles the invoice
    let response = client
        .post(format!("{}/payments", BASE_URL))
        .json(&json!({
            "booking_id": booking_id,
            "amount": "400"
        }))
        .send()
        .await
        .expect("Failed to record payment");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["payment_status"], "paid");
    assert_eq!(body["invoice"]["status"], "paid");

    // Payment history shows both rows
    let response = client
        .get(format!("{}/payments/booking/{}", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to list payments");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["payments"].as_array().map(|a| a.len()), Some(2));

    // Cleanup
    let _ = client
        .delete(format!("{}/bookings/{}", BASE_URL, booking_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_missing_payment_amount_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/payments", BASE_URL))
        .json(&json!({ "booking_id": 1 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_status_transition_rules() {
    let client = Client::new();
    let (room_id, room_number) = create_room(&client).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload(&room_number, "2027-12-01", "2027-12-03", "240"))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_i64().expect("No booking ID");

    // confirmed -> checked_in -> checked_out is the happy path
    for status in ["checked_in", "checked_out"] {
        let response = client
            .put(format!("{}/bookings/{}/status", BASE_URL, booking_id))
            .json(&json!({ "status": status }))
            .send()
            .await
            .expect("Failed to update status");
        assert!(response.status().is_success(), "transition to {}", status);
    }

    // checked_out is terminal
    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Unknown status is a validation error
    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .json(&json!({ "status": "paid" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Cleanup
    let _ = client
        .delete(format!("{}/bookings/{}", BASE_URL, booking_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_stats() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["rooms"]["total"].is_number());
    assert!(body["bookings"]["total"].is_number());
}
