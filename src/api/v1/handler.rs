use super::error::*;
use crate::application_port::{AuthUser, EmployeeService, ProjectService};
use crate::domain_model::{
    Address, Employee, EmployeeId, EmployeeInput, EmployeeOverview, Project, ProjectCounts,
    ProjectId, ProjectInput, ProjectStatus,
};
use crate::logger::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, reject};

// Request bodies are strict: an unknown or missing field is a 400, the field
// set must match the model exactly.

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressBody {
    pub add_line: String,
    pub state: String,
    pub hometown: String,
    pub pincode: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeBody {
    pub name: String,
    pub phone: Vec<String>,
    pub company: String,
    pub role: String,
    pub active: bool,
    pub address: AddressBody,
}

#[derive(Debug, Serialize)]
pub struct EmployeeReply {
    pub id: u64,
    pub name: String,
    pub phone: Vec<String>,
    pub company: String,
    pub role: String,
    pub active: bool,
    pub address: AddressBody,
    pub project_count: u64,
    pub ongoing_project_count: u64,
    pub completed_project_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectBody {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub employee_id: u64,
    pub status: ProjectStatus,
}

#[derive(Debug, Serialize)]
pub struct ProjectReply {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration: i64,
    pub employee_id: u64,
    pub status: ProjectStatus,
}

impl From<EmployeeBody> for EmployeeInput {
    fn from(body: EmployeeBody) -> Self {
        EmployeeInput {
            name: body.name,
            phone: body.phone,
            company: body.company,
            role: body.role,
            active: body.active,
            address: Address {
                add_line: body.address.add_line,
                state: body.address.state,
                hometown: body.address.hometown,
                pincode: body.address.pincode,
            },
        }
    }
}

fn employee_reply(employee: Employee, counts: ProjectCounts) -> EmployeeReply {
    EmployeeReply {
        id: employee.id.0,
        name: employee.name,
        phone: employee.phone,
        company: employee.company,
        role: employee.role,
        active: employee.active,
        address: AddressBody {
            add_line: employee.address.add_line,
            state: employee.address.state,
            hometown: employee.address.hometown,
            pincode: employee.address.pincode,
        },
        project_count: counts.total,
        ongoing_project_count: counts.ongoing,
        completed_project_count: counts.completed,
    }
}

impl From<EmployeeOverview> for EmployeeReply {
    fn from(overview: EmployeeOverview) -> Self {
        employee_reply(overview.employee, overview.counts)
    }
}

impl From<ProjectBody> for ProjectInput {
    fn from(body: ProjectBody) -> Self {
        ProjectInput {
            title: body.title,
            description: body.description,
            start_date: body.start_date,
            end_date: body.end_date,
            employee_id: EmployeeId(body.employee_id),
            status: body.status,
        }
    }
}

impl From<Project> for ProjectReply {
    fn from(project: Project) -> Self {
        ProjectReply {
            id: project.id.0,
            title: project.title,
            description: project.description,
            start_date: project.start_date,
            end_date: project.end_date,
            duration: project.duration_days,
            employee_id: project.employee_id.0,
            status: project.status,
        }
    }
}

pub async fn list_employees(
    user: AuthUser,
    service: Arc<dyn EmployeeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, "list employees");
    let overviews = service
        .list()
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    let replies: Vec<EmployeeReply> = overviews.into_iter().map(EmployeeReply::from).collect();
    Ok(warp::reply::json(&replies))
}

pub async fn create_employee(
    user: AuthUser,
    body: EmployeeBody,
    service: Arc<dyn EmployeeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, "create employee");
    let employee = service
        .create(body.into())
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    let reply = employee_reply(employee, Default::default());
    Ok(warp::reply::with_status(
        warp::reply::json(&reply),
        StatusCode::CREATED,
    ))
}

pub async fn get_employee(
    id: u64,
    user: AuthUser,
    service: Arc<dyn EmployeeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, id, "get employee");
    let overview = service
        .get(EmployeeId(id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&EmployeeReply::from(overview)))
}

pub async fn update_employee(
    id: u64,
    user: AuthUser,
    body: EmployeeBody,
    service: Arc<dyn EmployeeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, id, "update employee");
    let employee = service
        .update(EmployeeId(id), body.into())
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    let counts = service
        .get(employee.id)
        .await
        .map(|o| o.counts)
        .map_err(ApiError::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&employee_reply(employee, counts)))
}

pub async fn delete_employee(
    id: u64,
    user: AuthUser,
    service: Arc<dyn EmployeeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, id, "delete employee");
    service
        .delete(EmployeeId(id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_projects(
    user: AuthUser,
    service: Arc<dyn ProjectService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, "list projects");
    let projects = service
        .list()
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    let replies: Vec<ProjectReply> = projects.into_iter().map(ProjectReply::from).collect();
    Ok(warp::reply::json(&replies))
}

pub async fn create_project(
    user: AuthUser,
    body: ProjectBody,
    service: Arc<dyn ProjectService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, "create project");
    let project = service
        .create(body.into())
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&ProjectReply::from(project)),
        StatusCode::CREATED,
    ))
}

pub async fn get_project(
    id: u64,
    user: AuthUser,
    service: Arc<dyn ProjectService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, id, "get project");
    let project = service
        .get(ProjectId(id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ProjectReply::from(project)))
}

pub async fn update_project(
    id: u64,
    user: AuthUser,
    body: ProjectBody,
    service: Arc<dyn ProjectService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, id, "update project");
    let project = service
        .update(ProjectId(id), body.into())
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ProjectReply::from(project)))
}

pub async fn delete_project(
    id: u64,
    user: AuthUser,
    service: Arc<dyn ProjectService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(username = %user.username, id, "delete project");
    service
        .delete(ProjectId(id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(StatusCode::NO_CONTENT)
}
