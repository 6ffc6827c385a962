//! Customers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, UpdateCustomer},
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List customers, optionally filtered by a search term against
    /// name, email and phone
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE $1::text IS NULL
               OR first_name ILIKE '%' || $1 || '%'
               OR last_name ILIKE '%' || $1 || '%'
               OR email ILIKE '%' || $1 || '%'
               OR phone ILIKE '%' || $1 || '%'
            ORDER BY last_name, first_name
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    /// Get customer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Create a new customer
    pub async fn create(&self, customer: &CreateCustomer) -> AppResult<Customer> {
        if let Some(ref email) = customer.email {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1)")
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await?;
            if exists {
                return Err(AppError::Conflict(format!(
                    "Customer with email {} already exists",
                    email
                )));
            }
        }

        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, email, phone, address, id_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.id_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a customer's mutable fields
    pub async fn update(&self, id: i32, update: &UpdateCustomer) -> AppResult<Customer> {
        let customer = self.get_by_id(id).await?;

        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET first_name = $1, last_name = $2, email = $3, phone = $4,
                address = $5, id_number = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(update.first_name.as_ref().unwrap_or(&customer.first_name))
        .bind(update.last_name.as_ref().unwrap_or(&customer.last_name))
        .bind(update.email.as_ref().or(customer.email.as_ref()))
        .bind(update.phone.as_ref().unwrap_or(&customer.phone))
        .bind(update.address.as_ref().or(customer.address.as_ref()))
        .bind(update.id_number.as_ref().or(customer.id_number.as_ref()))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a customer; refused while bookings reference them
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get_by_id(id).await?;

        let has_bookings: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE customer_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if has_bookings {
            return Err(AppError::Conflict(
                "Customer has bookings and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
