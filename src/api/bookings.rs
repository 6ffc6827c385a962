//! Booking management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::booking::{
        Booking, BookingCharge, BookingDetails, BookingQuery, CreateBooking, CreateCharge,
    },
};

#[derive(Serialize, ToSchema)]
pub struct BookingsResponse {
    pub success: bool,
    pub bookings: Vec<Booking>,
}

#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: BookingDetails,
}

#[derive(Serialize, ToSchema)]
pub struct BookingStatusResponse {
    pub success: bool,
    pub booking: Booking,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateBookingStatus {
    /// pending | confirmed | checked_in | checked_out | cancelled
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ChargeResponse {
    pub success: bool,
    pub charge: BookingCharge,
}

/// List bookings with optional filters
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("status" = Option<String>, Query, description = "Filter by booking status"),
        ("room_id" = Option<i32>, Query, description = "Filter by room"),
        ("customer_id" = Option<i32>, Query, description = "Filter by customer")
    ),
    responses(
        (status = 200, description = "List of bookings", body = BookingsResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<BookingsResponse>> {
    let bookings = state.services.bookings.list(&query).await?;
    Ok(Json(BookingsResponse {
        success: true,
        bookings,
    }))
}

/// Get booking by ID with payment history and derived totals
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.get_details(id).await?;
    Ok(Json(BookingResponse {
        success: true,
        booking,
    }))
}

/// Create a booking: availability check, customer upsert, payments and
/// invoice in one atomic operation
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room already booked for the requested dates")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(booking): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state.services.bookings.create(booking).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            booking,
        }),
    ))
}

/// Transition a booking through its lifecycle
#[utoipa::path(
    put,
    path = "/bookings/{id}/status",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Status updated", body = BookingStatusResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateBookingStatus>,
) -> AppResult<Json<BookingStatusResponse>> {
    let booking = state.services.bookings.update_status(id, &body.status).await?;
    Ok(Json(BookingStatusResponse {
        success: true,
        booking,
    }))
}

/// Delete a booking together with its payments, charges and invoice
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add an extra charge to a booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/charges",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = CreateCharge,
    responses(
        (status = 201, description = "Charge added", body = ChargeResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn add_booking_charge(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(charge): Json<CreateCharge>,
) -> AppResult<(StatusCode, Json<ChargeResponse>)> {
    let charge = state.services.bookings.add_charge(id, charge).await?;
    Ok((
        StatusCode::CREATED,
        Json(ChargeResponse {
            success: true,
            charge,
        }),
    ))
}
