//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, customers, health, invoices, payments, rooms, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Veranda API",
        version = "0.3.0",
        description = "Hotel Booking & Invoicing System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Rooms
        rooms::list_rooms,
        rooms::available_rooms,
        rooms::room_occupancy,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::update_room_status,
        rooms::delete_room,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking_status,
        bookings::delete_booking,
        bookings::add_booking_charge,
        // Payments
        payments::record_payment,
        payments::list_booking_payments,
        // Invoices
        invoices::list_invoices,
        invoices::get_invoice,
        invoices::get_booking_invoice,
        invoices::create_invoice,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Rooms
            crate::models::room::Room,
            crate::models::room::CreateRoom,
            crate::models::room::UpdateRoom,
            rooms::RoomsResponse,
            rooms::RoomResponse,
            rooms::UpdateRoomStatus,
            rooms::OccupancyResponse,
            crate::availability::RoomPartition,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CreateCustomer,
            crate::models::customer::UpdateCustomer,
            customers::CustomersResponse,
            customers::CustomerResponse,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingCharge,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::CreateCharge,
            crate::models::booking::GuestInfo,
            crate::models::booking::BookingPaymentInput,
            bookings::BookingsResponse,
            bookings::BookingResponse,
            bookings::BookingStatusResponse,
            bookings::UpdateBookingStatus,
            bookings::ChargeResponse,
            // Payments
            crate::models::payment::Payment,
            crate::models::payment::RecordPayment,
            crate::models::payment::PaymentRecorded,
            payments::PaymentsResponse,
            payments::PaymentRecordedResponse,
            // Invoices
            crate::models::invoice::Invoice,
            invoices::InvoicesResponse,
            invoices::InvoiceResponse,
            invoices::CreateInvoiceRequest,
            // Stats
            crate::services::stats::Stats,
            crate::services::stats::RoomStats,
            crate::services::stats::BookingStats,
            crate::services::stats::RevenueStats,
            stats::StatsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rooms", description = "Room management and availability"),
        (name = "customers", description = "Customer management"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "payments", description = "Payment recording"),
        (name = "invoices", description = "Invoicing"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
