use crate::application_port::AuthError;
use crate::domain_model::UserId;
use std::fmt;

/// Stored credential record for one account. Owned by the user-management
/// side; the authenticator only ever reads it. `Debug` redacts the hash.
#[derive(Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Exact, case-sensitive username match. More than one matching row is a
    /// `DataIntegrity` fault, never a silent pick of one of them.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;
}
