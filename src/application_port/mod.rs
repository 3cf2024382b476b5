mod auth_service;
mod employee_service;
mod project_service;

pub use auth_service::*;
pub use employee_service::*;
pub use project_service::*;
