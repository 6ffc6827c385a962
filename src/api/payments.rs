//! Payment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::payment::{Payment, PaymentRecorded, RecordPayment},
};

#[derive(Serialize, ToSchema)]
pub struct PaymentsResponse {
    pub success: bool,
    pub payments: Vec<Payment>,
}

#[derive(Serialize, ToSchema)]
pub struct PaymentRecordedResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: PaymentRecorded,
}

/// Record a payment against a booking and synchronize its invoice
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = RecordPayment,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentRecordedResponse),
        (status = 400, description = "Missing or invalid amount"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn record_payment(
    State(state): State<crate::AppState>,
    Json(req): Json<RecordPayment>,
) -> AppResult<(StatusCode, Json<PaymentRecordedResponse>)> {
    let result = state.services.payments.record(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(PaymentRecordedResponse {
            success: true,
            result,
        }),
    ))
}

/// Payment history for a booking
#[utoipa::path(
    get,
    path = "/payments/booking/{booking_id}",
    tag = "payments",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Payments for the booking", body = PaymentsResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn list_booking_payments(
    State(state): State<crate::AppState>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<PaymentsResponse>> {
    let payments = state.services.payments.list_by_booking(booking_id).await?;
    Ok(Json(PaymentsResponse {
        success: true,
        payments,
    }))
}
