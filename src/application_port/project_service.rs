use crate::domain_model::{Project, ProjectId, ProjectInput};

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("{0}")]
    Validation(String),
    #[error("A project with this title already exists.")]
    DuplicateTitle,
    #[error("project not found")]
    NotFound,
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait ProjectService: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, ProjectError>;
    async fn create(&self, input: ProjectInput) -> Result<Project, ProjectError>;
    async fn get(&self, id: ProjectId) -> Result<Project, ProjectError>;
    async fn update(&self, id: ProjectId, input: ProjectInput) -> Result<Project, ProjectError>;
    async fn delete(&self, id: ProjectId) -> Result<(), ProjectError>;
}
