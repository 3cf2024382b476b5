mod auth_service_impl;
mod credential_extractor;
mod employee_repo_fake;
mod employee_service_impl;
mod project_repo_fake;
mod project_service_impl;
mod repo_tx_fake;
mod user_repo_fake;

pub use auth_service_impl::*;
pub use credential_extractor::*;
pub use employee_repo_fake::*;
pub use employee_service_impl::*;
pub use project_repo_fake::*;
pub use project_service_impl::*;
pub use repo_tx_fake::*;
pub use user_repo_fake::*;
