mod employee;
mod project;
mod user;

pub use employee::*;
pub use project::*;
pub use user::*;
