//! Customer management service

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, UpdateCustomer},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Customer>> {
        self.repository.customers.list(search).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    pub async fn create(&self, customer: CreateCustomer) -> AppResult<Customer> {
        validator::Validate::validate(&customer)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.customers.create(&customer).await
    }

    pub async fn update(&self, id: i32, update: UpdateCustomer) -> AppResult<Customer> {
        self.repository.customers.update(id, &update).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.customers.delete(id).await
    }
}
