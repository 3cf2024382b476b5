use crate::domain_model::UserId;
use std::collections::HashMap;
use std::fmt;

/// Failures inside the authentication machinery itself. Denials are not
/// errors; they are ordinary `AuthResult::Rejected` outcomes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("data integrity fault: {0}")]
    DataIntegrity(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Credentials supplied with a single request. Extracted fresh per request,
/// never persisted. The `Debug` impl redacts the password so the pair can be
/// traced without leaking it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The slice of an inbound request the authenticator is allowed to see:
/// the raw `Authorization` header plus the query and form parameters that
/// serve as the legacy fallback credential source.
#[derive(Debug, Default, Clone)]
pub struct RequestAuth {
    pub authorization: Option<String>,
    pub query: HashMap<String, String>,
    pub form: HashMap<String, String>,
}

/// Identity handed to resource handlers once a request is allowed.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    AuthenticationRequired,
    MalformedCredentials,
    /// Unknown username and wrong password collapse to this one reason so
    /// responses cannot be used to enumerate accounts.
    InvalidCredentials,
    AccountInactive,
}

impl DenyReason {
    pub fn detail(&self) -> &'static str {
        match self {
            DenyReason::AuthenticationRequired => "authentication required",
            DenyReason::MalformedCredentials => "malformed credentials",
            DenyReason::InvalidCredentials => "invalid username or password",
            DenyReason::AccountInactive => "account inactive",
        }
    }
}

/// Outcome of one authentication attempt.
///
/// `Anonymous` means no credentials were supplied at all; whether that is
/// acceptable is the caller's decision (every endpoint in this API treats it
/// as a denial). `Rejected` always terminates the request.
#[derive(Debug)]
pub enum AuthResult {
    Authenticated(AuthUser),
    Anonymous,
    Rejected(DenyReason),
}

/// Pluggable per-request authentication strategy. One concrete Basic-Auth
/// implementation exists today; the seam leaves room for others.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self, request: RequestAuth) -> Result<AuthResult, AuthError>;
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}
