use crate::application_port::ProjectError;
use crate::domain_model::{EmployeeId, Project, ProjectCounts, ProjectId, ProjectInput};
use crate::domain_port::StorageTx;

#[async_trait::async_trait]
pub trait ProjectRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, ProjectError>;

    async fn find(&self, id: ProjectId) -> Result<Option<Project>, ProjectError>;

    /// Case-insensitive title match among live rows, optionally excluding one
    /// project (for updates).
    async fn title_exists(
        &self,
        title: &str,
        exclude: Option<ProjectId>,
    ) -> Result<bool, ProjectError>;

    async fn create(
        &self,
        input: &ProjectInput,
        duration_days: i64,
    ) -> Result<ProjectId, ProjectError>;

    async fn update(
        &self,
        id: ProjectId,
        input: &ProjectInput,
        duration_days: i64,
    ) -> Result<(), ProjectError>;

    async fn soft_delete(&self, id: ProjectId) -> Result<(), ProjectError>;

    async fn counts_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<ProjectCounts, ProjectError>;

    /// Cascade used when an employee is deleted.
    async fn soft_delete_by_employee_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        employee_id: EmployeeId,
    ) -> Result<(), ProjectError>;
}
