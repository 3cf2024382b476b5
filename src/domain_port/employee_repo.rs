use crate::application_port::EmployeeError;
use crate::domain_model::{Employee, EmployeeId, EmployeeInput};
use crate::domain_port::StorageTx;

#[async_trait::async_trait]
pub trait EmployeeRepo: Send + Sync {
    /// Live (not soft-deleted) employees with their addresses.
    async fn list(&self) -> Result<Vec<Employee>, EmployeeError>;

    async fn find(&self, id: EmployeeId) -> Result<Option<Employee>, EmployeeError>;

    /// Case-insensitive name match among live rows, optionally excluding one
    /// employee (for updates).
    async fn name_exists(
        &self,
        name: &str,
        exclude: Option<EmployeeId>,
    ) -> Result<bool, EmployeeError>;

    /// Inserts the address row and the employee row in the given transaction.
    async fn create_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        input: &EmployeeInput,
    ) -> Result<EmployeeId, EmployeeError>;

    /// Full replace of the employee row and its address row.
    async fn update_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        id: EmployeeId,
        input: &EmployeeInput,
    ) -> Result<(), EmployeeError>;

    /// Marks the employee and its address as deleted.
    async fn soft_delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        id: EmployeeId,
    ) -> Result<(), EmployeeError>;
}
