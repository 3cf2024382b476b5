use crate::application_port::{EmployeeError, EmployeeService};
use crate::domain_model::{Employee, EmployeeId, EmployeeInput, EmployeeOverview};
use crate::domain_port::{EmployeeRepo, ProjectRepo, TxManager};
use crate::logger::*;
use std::sync::Arc;

fn letters_and_spaces(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn validate(input: &EmployeeInput) -> Result<(), EmployeeError> {
    if !letters_and_spaces(&input.name) {
        return Err(EmployeeError::Validation(
            "Name should only contain letters and spaces.".to_string(),
        ));
    }
    for phone in &input.phone {
        if !all_digits(phone, 10) {
            return Err(EmployeeError::Validation(format!(
                "Invalid phone number: {phone}. Each phone number must be exactly 10 digits."
            )));
        }
    }
    if !letters_and_spaces(&input.company) {
        return Err(EmployeeError::Validation(
            "Company should only contain letters and spaces.".to_string(),
        ));
    }
    if !letters_and_spaces(&input.role) {
        return Err(EmployeeError::Validation(
            "Role should only contain letters and spaces.".to_string(),
        ));
    }
    if !all_digits(&input.address.pincode, 6) {
        return Err(EmployeeError::Validation(
            "Pincode must be exactly 6 digits.".to_string(),
        ));
    }
    if !letters_and_spaces(&input.address.state) {
        return Err(EmployeeError::Validation(
            "State should only contain letters and spaces.".to_string(),
        ));
    }
    Ok(())
}

pub struct RealEmployeeService {
    employee_repo: Arc<dyn EmployeeRepo>,
    project_repo: Arc<dyn ProjectRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealEmployeeService {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepo>,
        project_repo: Arc<dyn ProjectRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        RealEmployeeService {
            employee_repo,
            project_repo,
            tx_manager,
        }
    }

    async fn with_counts(&self, employee: Employee) -> Result<EmployeeOverview, EmployeeError> {
        let counts = self
            .project_repo
            .counts_for_employee(employee.id)
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;
        Ok(EmployeeOverview { employee, counts })
    }
}

#[async_trait::async_trait]
impl EmployeeService for RealEmployeeService {
    async fn list(&self) -> Result<Vec<EmployeeOverview>, EmployeeError> {
        let employees = self.employee_repo.list().await?;
        let mut overviews = Vec::with_capacity(employees.len());
        for employee in employees {
            overviews.push(self.with_counts(employee).await?);
        }
        Ok(overviews)
    }

    async fn create(&self, input: EmployeeInput) -> Result<Employee, EmployeeError> {
        validate(&input)?;

        if self.employee_repo.name_exists(&input.name, None).await? {
            return Err(EmployeeError::DuplicateName);
        }

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        let id = self.employee_repo.create_in_tx(tx.as_mut(), &input).await?;

        tx.commit()
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        info!(%id, name = %input.name, "employee created");
        self.employee_repo
            .find(id)
            .await?
            .ok_or(EmployeeError::NotFound)
    }

    async fn get(&self, id: EmployeeId) -> Result<EmployeeOverview, EmployeeError> {
        let employee = self
            .employee_repo
            .find(id)
            .await?
            .ok_or(EmployeeError::NotFound)?;
        self.with_counts(employee).await
    }

    async fn update(
        &self,
        id: EmployeeId,
        input: EmployeeInput,
    ) -> Result<Employee, EmployeeError> {
        validate(&input)?;

        if self.employee_repo.find(id).await?.is_none() {
            return Err(EmployeeError::NotFound);
        }
        if self.employee_repo.name_exists(&input.name, Some(id)).await? {
            return Err(EmployeeError::DuplicateName);
        }

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        self.employee_repo
            .update_in_tx(tx.as_mut(), id, &input)
            .await?;

        tx.commit()
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        self.employee_repo
            .find(id)
            .await?
            .ok_or(EmployeeError::NotFound)
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), EmployeeError> {
        if self.employee_repo.find(id).await?.is_none() {
            return Err(EmployeeError::NotFound);
        }

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        self.project_repo
            .soft_delete_by_employee_in_tx(tx.as_mut(), id)
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;
        self.employee_repo.soft_delete_in_tx(tx.as_mut(), id).await?;

        tx.commit()
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        info!(%id, "employee deleted");
        Ok(())
    }
}
