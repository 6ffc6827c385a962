//! Invoice endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::invoice::Invoice};

#[derive(Serialize, ToSchema)]
pub struct InvoicesResponse {
    pub success: bool,
    pub invoices: Vec<Invoice>,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub success: bool,
    pub invoice: Invoice,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    pub booking_id: i32,
}

/// List all invoices
#[utoipa::path(
    get,
    path = "/invoices",
    tag = "invoices",
    responses(
        (status = 200, description = "List of invoices", body = InvoicesResponse)
    )
)]
pub async fn list_invoices(
    State(state): State<crate::AppState>,
) -> AppResult<Json<InvoicesResponse>> {
    let invoices = state.services.invoices.list().await?;
    Ok(Json(InvoicesResponse {
        success: true,
        invoices,
    }))
}

/// Get invoice by ID
#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = "invoices",
    params(
        ("id" = i32, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice details", body = InvoiceResponse),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn get_invoice(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<InvoiceResponse>> {
    let invoice = state.services.invoices.get(id).await?;
    Ok(Json(InvoiceResponse {
        success: true,
        invoice,
    }))
}

/// Get the invoice for a booking
#[utoipa::path(
    get,
    path = "/invoices/booking/{booking_id}",
    tag = "invoices",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Invoice for the booking", body = InvoiceResponse),
        (status = 404, description = "No invoice for this booking")
    )
)]
pub async fn get_booking_invoice(
    State(state): State<crate::AppState>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<InvoiceResponse>> {
    let invoice = state.services.invoices.get_by_booking(booking_id).await?;
    Ok(Json(InvoiceResponse {
        success: true,
        invoice,
    }))
}

/// Issue an invoice for a booking that does not have one yet
#[utoipa::path(
    post,
    path = "/invoices",
    tag = "invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice issued", body = InvoiceResponse),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already has an invoice")
    )
)]
pub async fn create_invoice(
    State(state): State<crate::AppState>,
    Json(req): Json<CreateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<InvoiceResponse>)> {
    let invoice = state
        .services
        .invoices
        .create_for_booking(req.booking_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(InvoiceResponse {
            success: true,
            invoice,
        }),
    ))
}
