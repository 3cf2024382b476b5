mod employee_repo;
mod project_repo;
mod user_repo;

mod repo_tx;

pub use employee_repo::*;
pub use project_repo::*;
pub use user_repo::*;

pub use repo_tx::*;
