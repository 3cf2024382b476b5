use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub add_line: String,
    pub state: String,
    pub hometown: String,
    pub pincode: String,
}

#[derive(Debug, Clone)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub phone: Vec<String>,
    pub company: String,
    pub role: String,
    pub active: bool,
    pub address: Address,
}

/// Employee fields as supplied by a client; used for both create and
/// full-replace update.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub name: String,
    pub phone: Vec<String>,
    pub company: String,
    pub role: String,
    pub active: bool,
    pub address: Address,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectCounts {
    pub total: u64,
    pub ongoing: u64,
    pub completed: u64,
}

/// An employee together with the per-status project tallies shown in
/// read responses.
#[derive(Debug, Clone)]
pub struct EmployeeOverview {
    pub employee: Employee,
    pub counts: ProjectCounts,
}
