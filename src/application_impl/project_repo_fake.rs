use crate::application_port::ProjectError;
use crate::domain_model::{
    EmployeeId, Project, ProjectCounts, ProjectId, ProjectInput, ProjectStatus,
};
use crate::domain_port::{ProjectRepo, StorageTx};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    next_id: u64,
    projects: Vec<Project>,
    deleted: Vec<ProjectId>,
}

#[derive(Default)]
pub struct FakeProjectRepo {
    state: Mutex<State>,
}

impl FakeProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deleted_ids(&self) -> Vec<ProjectId> {
        self.state.lock().unwrap().deleted.clone()
    }
}

fn to_project(id: ProjectId, input: &ProjectInput, duration_days: i64) -> Project {
    Project {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        start_date: input.start_date,
        end_date: input.end_date,
        duration_days,
        employee_id: input.employee_id,
        status: input.status,
    }
}

#[async_trait::async_trait]
impl ProjectRepo for FakeProjectRepo {
    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        Ok(self.state.lock().unwrap().projects.clone())
    }

    async fn find(&self, id: ProjectId) -> Result<Option<Project>, ProjectError> {
        let state = self.state.lock().unwrap();
        Ok(state.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn title_exists(
        &self,
        title: &str,
        exclude: Option<ProjectId>,
    ) -> Result<bool, ProjectError> {
        let state = self.state.lock().unwrap();
        Ok(state.projects.iter().any(|p| {
            p.title.eq_ignore_ascii_case(title) && Some(p.id) != exclude
        }))
    }

    async fn create(
        &self,
        input: &ProjectInput,
        duration_days: i64,
    ) -> Result<ProjectId, ProjectError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = ProjectId(state.next_id);
        let project = to_project(id, input, duration_days);
        state.projects.push(project);
        Ok(id)
    }

    async fn update(
        &self,
        id: ProjectId,
        input: &ProjectInput,
        duration_days: i64,
    ) -> Result<(), ProjectError> {
        let mut state = self.state.lock().unwrap();
        let existing = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProjectError::NotFound)?;
        *existing = to_project(id, input, duration_days);
        Ok(())
    }

    async fn soft_delete(&self, id: ProjectId) -> Result<(), ProjectError> {
        let mut state = self.state.lock().unwrap();
        state.projects.retain(|p| p.id != id);
        state.deleted.push(id);
        Ok(())
    }

    async fn counts_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<ProjectCounts, ProjectError> {
        let state = self.state.lock().unwrap();
        let mut counts = ProjectCounts::default();
        for project in state.projects.iter().filter(|p| p.employee_id == employee_id) {
            counts.total += 1;
            match project.status {
                ProjectStatus::Ongoing => counts.ongoing += 1,
                ProjectStatus::Done => counts.completed += 1,
            }
        }
        Ok(counts)
    }

    async fn soft_delete_by_employee_in_tx<'t>(
        &self,
        _tx: &mut dyn StorageTx<'t>,
        employee_id: EmployeeId,
    ) -> Result<(), ProjectError> {
        let mut state = self.state.lock().unwrap();
        let (gone, kept): (Vec<Project>, Vec<Project>) = state
            .projects
            .drain(..)
            .partition(|p| p.employee_id == employee_id);
        state.projects = kept;
        state.deleted.extend(gone.into_iter().map(|p| p.id));
        Ok(())
    }
}
