mod employee_repo_mysql;
mod project_repo_mysql;
mod user_repo_mysql;

mod repo_tx_mysql;
mod util;

pub use employee_repo_mysql::*;
pub use project_repo_mysql::*;
pub use user_repo_mysql::*;

pub use repo_tx_mysql::*;
