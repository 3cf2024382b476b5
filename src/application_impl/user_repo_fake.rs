use crate::application_port::AuthError;
use crate::domain_port::{UserRecord, UserRepo};
use std::sync::Mutex;

/// In-memory user store for tests. Deliberately allows duplicate usernames
/// so the integrity-fault path can be exercised.
#[derive(Default)]
pub struct FakeUserRepo {
    records: Mutex<Vec<UserRecord>>,
}

impl FakeUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: UserRecord) {
        self.records.lock().unwrap().push(record);
    }
}

#[async_trait::async_trait]
impl UserRepo for FakeUserRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let records = self.records.lock().unwrap();
        let mut matches = records.iter().filter(|r| r.username == username);

        let first = matches.next().cloned();
        if first.is_some() && matches.next().is_some() {
            return Err(AuthError::DataIntegrity(format!(
                "more than one user row for username {username}"
            )));
        }
        Ok(first)
    }
}
