use crate::application_port::{ProjectError, ProjectService};
use crate::domain_model::{Project, ProjectId, ProjectInput};
use crate::domain_port::{EmployeeRepo, ProjectRepo};
use crate::logger::*;
use std::sync::Arc;

fn title_charset(value: &str) -> bool {
    !value.trim().is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

/// Days from start to end; negative means the dates are inverted.
fn duration_days(input: &ProjectInput) -> Result<i64, ProjectError> {
    let days = (input.end_date - input.start_date).num_days();
    if days < 0 {
        return Err(ProjectError::Validation(
            "End date must be after the start date.".to_string(),
        ));
    }
    Ok(days)
}

fn validate(input: &ProjectInput) -> Result<(), ProjectError> {
    if !title_charset(&input.title) {
        return Err(ProjectError::Validation(
            "Title should only contain letters, digits and spaces.".to_string(),
        ));
    }
    Ok(())
}

pub struct RealProjectService {
    project_repo: Arc<dyn ProjectRepo>,
    employee_repo: Arc<dyn EmployeeRepo>,
}

impl RealProjectService {
    pub fn new(project_repo: Arc<dyn ProjectRepo>, employee_repo: Arc<dyn EmployeeRepo>) -> Self {
        RealProjectService {
            project_repo,
            employee_repo,
        }
    }

    async fn employee_exists(&self, input: &ProjectInput) -> Result<(), ProjectError> {
        let found = self
            .employee_repo
            .find(input.employee_id)
            .await
            .map_err(|e| ProjectError::Store(e.to_string()))?;
        if found.is_none() {
            return Err(ProjectError::EmployeeNotFound);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProjectService for RealProjectService {
    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        self.project_repo.list().await
    }

    async fn create(&self, input: ProjectInput) -> Result<Project, ProjectError> {
        validate(&input)?;
        let duration = duration_days(&input)?;

        if self.project_repo.title_exists(&input.title, None).await? {
            return Err(ProjectError::DuplicateTitle);
        }
        self.employee_exists(&input).await?;

        let id = self.project_repo.create(&input, duration).await?;
        info!(%id, title = %input.title, "project created");

        self.project_repo
            .find(id)
            .await?
            .ok_or(ProjectError::NotFound)
    }

    async fn get(&self, id: ProjectId) -> Result<Project, ProjectError> {
        self.project_repo
            .find(id)
            .await?
            .ok_or(ProjectError::NotFound)
    }

    async fn update(&self, id: ProjectId, input: ProjectInput) -> Result<Project, ProjectError> {
        validate(&input)?;
        let duration = duration_days(&input)?;

        if self.project_repo.find(id).await?.is_none() {
            return Err(ProjectError::NotFound);
        }
        if self
            .project_repo
            .title_exists(&input.title, Some(id))
            .await?
        {
            return Err(ProjectError::DuplicateTitle);
        }
        self.employee_exists(&input).await?;

        self.project_repo.update(id, &input, duration).await?;

        self.project_repo
            .find(id)
            .await?
            .ok_or(ProjectError::NotFound)
    }

    async fn delete(&self, id: ProjectId) -> Result<(), ProjectError> {
        if self.project_repo.find(id).await?.is_none() {
            return Err(ProjectError::NotFound);
        }
        self.project_repo.soft_delete(id).await?;
        info!(%id, "project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::{
        FakeEmployeeRepo, FakeProjectRepo, FakeTxManager,
    };
    use crate::domain_model::{Address, EmployeeId, EmployeeInput, ProjectStatus};
    use crate::domain_port::{EmployeeRepo, TxManager};
    use chrono::{TimeZone, Utc};

    async fn seeded_employee(repo: &FakeEmployeeRepo) -> EmployeeId {
        let mut tx = FakeTxManager.begin().await.unwrap();
        let id = repo
            .create_in_tx(
                tx.as_mut(),
                &EmployeeInput {
                    name: "Alice Smith".to_string(),
                    phone: vec![],
                    company: "Initech".to_string(),
                    role: "Engineer".to_string(),
                    active: true,
                    address: Address {
                        add_line: "12 Main Street".to_string(),
                        state: "Karnataka".to_string(),
                        hometown: "Bengaluru".to_string(),
                        pincode: "560001".to_string(),
                    },
                },
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();
        id
    }

    fn input(title: &str, employee_id: EmployeeId) -> ProjectInput {
        ProjectInput {
            title: title.to_string(),
            description: "a project".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
            employee_id,
            status: ProjectStatus::Ongoing,
        }
    }

    async fn service() -> (RealProjectService, EmployeeId) {
        let employee_repo = Arc::new(FakeEmployeeRepo::new());
        let employee_id = seeded_employee(&employee_repo).await;
        let service = RealProjectService::new(Arc::new(FakeProjectRepo::new()), employee_repo);
        (service, employee_id)
    }

    #[tokio::test]
    async fn derives_duration_in_days() {
        let (service, employee_id) = service().await;
        let project = service.create(input("Apollo 11", employee_id)).await.unwrap();
        assert_eq!(project.duration_days, 30);
    }

    #[tokio::test]
    async fn rejects_inverted_dates() {
        let (service, employee_id) = service().await;
        let mut bad = input("Apollo 11", employee_id);
        std::mem::swap(&mut bad.start_date, &mut bad.end_date);
        let err = service.create(bad).await.unwrap_err();
        assert!(matches!(err, ProjectError::Validation(msg)
            if msg == "End date must be after the start date."));
    }

    #[tokio::test]
    async fn rejects_punctuation_in_title() {
        let (service, employee_id) = service().await;
        let err = service
            .create(input("Apollo-11!", employee_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_title_is_case_insensitive() {
        let (service, employee_id) = service().await;
        service.create(input("Apollo 11", employee_id)).await.unwrap();
        let err = service
            .create(input("apollo 11", employee_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::DuplicateTitle));
    }

    #[tokio::test]
    async fn rejects_unknown_employee() {
        let (service, _) = service().await;
        let err = service
            .create(input("Apollo 11", EmployeeId(999)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::EmployeeNotFound));
    }

    #[tokio::test]
    async fn update_recomputes_duration() {
        let (service, employee_id) = service().await;
        let project = service.create(input("Apollo 11", employee_id)).await.unwrap();

        let mut changed = input("Apollo 11", employee_id);
        changed.end_date = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap();
        let updated = service.update(project.id, changed).await.unwrap();
        assert_eq!(updated.duration_days, 5);
    }

    #[tokio::test]
    async fn delete_of_missing_project_is_not_found() {
        let (service, _) = service().await;
        let err = service.delete(ProjectId(7)).await.unwrap_err();
        assert!(matches!(err, ProjectError::NotFound));
    }
}
