//! Customer management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer},
};

#[derive(Serialize, ToSchema)]
pub struct CustomersResponse {
    pub success: bool,
    pub customers: Vec<Customer>,
}

#[derive(Serialize, ToSchema)]
pub struct CustomerResponse {
    pub success: bool,
    pub customer: Customer,
}

/// List customers, optionally filtered by a search term
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(
        ("search" = Option<String>, Query, description = "Match against name, email or phone")
    ),
    responses(
        (status = 200, description = "List of customers", body = CustomersResponse)
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<CustomersResponse>> {
    let customers = state.services.customers.list(query.search.as_deref()).await?;
    Ok(Json(CustomersResponse {
        success: true,
        customers,
    }))
}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer details", body = CustomerResponse),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state.services.customers.get(id).await?;
    Ok(Json(CustomerResponse {
        success: true,
        customer,
    }))
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    Json(customer): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    let customer = state.services.customers.create(customer).await?;
    Ok((
        StatusCode::CREATED,
        Json(CustomerResponse {
            success: true,
            customer,
        }),
    ))
}

/// Update an existing customer
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(update): Json<UpdateCustomer>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state.services.customers.update(id, update).await?;
    Ok(Json(CustomerResponse {
        success: true,
        customer,
    }))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer has bookings")
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
