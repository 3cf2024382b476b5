use crate::application_port::EmployeeError;
use crate::domain_model::{Employee, EmployeeId, EmployeeInput};
use crate::domain_port::{EmployeeRepo, StorageTx};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    next_id: u64,
    employees: Vec<Employee>,
    deleted: Vec<EmployeeId>,
}

/// In-memory employee store for tests. Soft deletes are tracked so tests
/// can assert the cascade happened.
#[derive(Default)]
pub struct FakeEmployeeRepo {
    state: Mutex<State>,
}

impl FakeEmployeeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deleted_ids(&self) -> Vec<EmployeeId> {
        self.state.lock().unwrap().deleted.clone()
    }
}

fn to_employee(id: EmployeeId, input: &EmployeeInput) -> Employee {
    Employee {
        id,
        name: input.name.clone(),
        phone: input.phone.clone(),
        company: input.company.clone(),
        role: input.role.clone(),
        active: input.active,
        address: input.address.clone(),
    }
}

#[async_trait::async_trait]
impl EmployeeRepo for FakeEmployeeRepo {
    async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        Ok(self.state.lock().unwrap().employees.clone())
    }

    async fn find(&self, id: EmployeeId) -> Result<Option<Employee>, EmployeeError> {
        let state = self.state.lock().unwrap();
        Ok(state.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn name_exists(
        &self,
        name: &str,
        exclude: Option<EmployeeId>,
    ) -> Result<bool, EmployeeError> {
        let state = self.state.lock().unwrap();
        Ok(state.employees.iter().any(|e| {
            e.name.eq_ignore_ascii_case(name) && Some(e.id) != exclude
        }))
    }

    async fn create_in_tx<'t>(
        &self,
        _tx: &mut dyn StorageTx<'t>,
        input: &EmployeeInput,
    ) -> Result<EmployeeId, EmployeeError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = EmployeeId(state.next_id);
        let employee = to_employee(id, input);
        state.employees.push(employee);
        Ok(id)
    }

    async fn update_in_tx<'t>(
        &self,
        _tx: &mut dyn StorageTx<'t>,
        id: EmployeeId,
        input: &EmployeeInput,
    ) -> Result<(), EmployeeError> {
        let mut state = self.state.lock().unwrap();
        let existing = state
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EmployeeError::NotFound)?;
        *existing = to_employee(id, input);
        Ok(())
    }

    async fn soft_delete_in_tx<'t>(
        &self,
        _tx: &mut dyn StorageTx<'t>,
        id: EmployeeId,
    ) -> Result<(), EmployeeError> {
        let mut state = self.state.lock().unwrap();
        state.employees.retain(|e| e.id != id);
        state.deleted.push(id);
        Ok(())
    }
}
