use crate::domain_model::{Employee, EmployeeId, EmployeeInput, EmployeeOverview};

#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    #[error("{0}")]
    Validation(String),
    #[error("An employee with this name already exists.")]
    DuplicateName,
    #[error("employee not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait EmployeeService: Send + Sync {
    async fn list(&self) -> Result<Vec<EmployeeOverview>, EmployeeError>;
    async fn create(&self, input: EmployeeInput) -> Result<Employee, EmployeeError>;
    async fn get(&self, id: EmployeeId) -> Result<EmployeeOverview, EmployeeError>;
    async fn update(&self, id: EmployeeId, input: EmployeeInput) -> Result<Employee, EmployeeError>;
    /// Soft delete; cascades to the employee's address and projects.
    async fn delete(&self, id: EmployeeId) -> Result<(), EmployeeError>;
}
