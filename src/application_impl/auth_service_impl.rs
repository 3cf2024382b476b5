use crate::application_impl::extract_credentials;
use crate::application_port::{
    AuthError, AuthResult, AuthService, AuthUser, CredentialHasher, DenyReason, RequestAuth,
};
use crate::domain_port::UserRepo;
use crate::logger::*;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::rand_core::OsRng;
use std::sync::Arc;

pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// PHC-aware comparison: the stored string names the algorithm, salt and
    /// cost parameters. A hash that does not parse, or names parameters we
    /// cannot run, verifies as false rather than erroring.
    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let Ok(parsed) = PasswordHash::new(password_hash) else {
            debug!("stored password hash does not parse as PHC");
            return Ok(false);
        };

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Syntactically valid argon2id PHC string (default cost parameters) whose
/// digest matches no password. Verified against when the username resolves
/// to nothing, so the unknown-user path costs the same as a real mismatch.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0ZHVtbXlzYQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// HTTP Basic Authentication against the user store: extract credentials,
/// resolve the username, verify the password. Stateless; one store read per
/// call and no mutation, so repeated attempts always produce the same
/// outcome. No lockout or backoff is applied (known gap).
pub struct BasicAuthService {
    user_repo: Arc<dyn UserRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
}

impl BasicAuthService {
    pub fn new(user_repo: Arc<dyn UserRepo>, credential_hasher: Arc<dyn CredentialHasher>) -> Self {
        BasicAuthService {
            user_repo,
            credential_hasher,
        }
    }
}

#[async_trait::async_trait]
impl AuthService for BasicAuthService {
    async fn authenticate(&self, request: RequestAuth) -> Result<AuthResult, AuthError> {
        let credentials = match extract_credentials(&request) {
            Ok(Some(credentials)) => credentials,
            Ok(None) => {
                debug!("no credentials supplied");
                return Ok(AuthResult::Anonymous);
            }
            Err(_) => {
                warn!("malformed credentials in request");
                return Ok(AuthResult::Rejected(DenyReason::MalformedCredentials));
            }
        };

        let record = self
            .user_repo
            .find_by_username(&credentials.username)
            .await?;

        let Some(record) = record else {
            // Burn the same hashing cost as the mismatch path so response
            // timing does not reveal whether the username exists.
            let _ = self
                .credential_hasher
                .verify_password(&credentials.password, DUMMY_PASSWORD_HASH)
                .await?;
            debug!(username = %credentials.username, "unknown username");
            return Ok(AuthResult::Rejected(DenyReason::InvalidCredentials));
        };

        let matched = self
            .credential_hasher
            .verify_password(&credentials.password, &record.password_hash)
            .await?;
        if !matched {
            debug!(username = %record.username, "password mismatch");
            return Ok(AuthResult::Rejected(DenyReason::InvalidCredentials));
        }

        // Checked after the password so the distinct inactive message is
        // only ever disclosed to someone holding valid credentials.
        if !record.is_active {
            debug!(username = %record.username, "account inactive");
            return Ok(AuthResult::Rejected(DenyReason::AccountInactive));
        }

        info!(username = %record.username, "authentication successful");
        Ok(AuthResult::Authenticated(AuthUser {
            user_id: record.user_id,
            username: record.username,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::FakeUserRepo;
    use crate::domain_model::UserId;
    use crate::domain_port::UserRecord;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use std::collections::HashMap;

    fn basic_header(username: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
    }

    fn request_with_header(header: &str) -> RequestAuth {
        RequestAuth {
            authorization: Some(header.to_string()),
            query: HashMap::new(),
            form: HashMap::new(),
        }
    }

    async fn service_with_user(username: &str, password: &str, is_active: bool) -> BasicAuthService {
        let hasher = Argon2PasswordHasher;
        let password_hash = hasher.hash_password(password).await.unwrap();
        let repo = FakeUserRepo::new();
        repo.insert(UserRecord {
            user_id: UserId(uuid::Uuid::new_v4()),
            username: username.to_string(),
            password_hash,
            is_active,
        });
        BasicAuthService::new(Arc::new(repo), Arc::new(Argon2PasswordHasher))
    }

    #[test]
    fn dummy_hash_is_well_formed() {
        assert!(PasswordHash::new(DUMMY_PASSWORD_HASH).is_ok());
    }

    #[tokio::test]
    async fn dummy_hash_matches_no_password() {
        let hasher = Argon2PasswordHasher;
        let matched = hasher
            .verify_password("anything", DUMMY_PASSWORD_HASH)
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn malformed_stored_hash_verifies_false() {
        let hasher = Argon2PasswordHasher;
        assert!(!hasher.verify_password("pw", "not-a-phc-string").await.unwrap());
        assert!(!hasher.verify_password("pw", "").await.unwrap());
    }

    #[tokio::test]
    async fn valid_credentials_are_allowed() {
        let service = service_with_user("alice", "correct-pw", true).await;
        let request = request_with_header(&basic_header("alice", "correct-pw"));

        match service.authenticate(request).await.unwrap() {
            AuthResult::Authenticated(user) => assert_eq!(user.username, "alice"),
            other => panic!("expected Authenticated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let service = service_with_user("alice", "correct-pw", true).await;
        let request = request_with_header(&basic_header("alice", "wrong-pw"));

        match service.authenticate(request).await.unwrap() {
            AuthResult::Rejected(reason) => assert_eq!(reason, DenyReason::InvalidCredentials),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_user_gets_the_same_reason_as_wrong_password() {
        let service = service_with_user("alice", "correct-pw", true).await;

        let ghost = service
            .authenticate(request_with_header(&basic_header("ghost", "anything")))
            .await
            .unwrap();
        let mismatch = service
            .authenticate(request_with_header(&basic_header("alice", "wrong-pw")))
            .await
            .unwrap();

        let (AuthResult::Rejected(a), AuthResult::Rejected(b)) = (ghost, mismatch) else {
            panic!("expected both attempts to be rejected");
        };
        assert_eq!(a, b);
        assert_eq!(a.detail(), "invalid username or password");
    }

    #[tokio::test]
    async fn no_credentials_is_anonymous() {
        let service = service_with_user("alice", "correct-pw", true).await;
        let request = RequestAuth::default();

        assert!(matches!(
            service.authenticate(request).await.unwrap(),
            AuthResult::Anonymous
        ));
    }

    #[tokio::test]
    async fn bearer_scheme_is_rejected_as_malformed() {
        let service = service_with_user("alice", "correct-pw", true).await;
        let request = request_with_header("Bearer abc123");

        assert!(matches!(
            service.authenticate(request).await.unwrap(),
            AuthResult::Rejected(DenyReason::MalformedCredentials)
        ));
    }

    #[tokio::test]
    async fn invalid_base64_is_rejected_as_malformed() {
        let service = service_with_user("alice", "correct-pw", true).await;
        let request = request_with_header("Basic %%%");

        assert!(matches!(
            service.authenticate(request).await.unwrap(),
            AuthResult::Rejected(DenyReason::MalformedCredentials)
        ));
    }

    #[tokio::test]
    async fn inactive_account_with_valid_password_is_rejected_as_inactive() {
        let service = service_with_user("alice", "correct-pw", false).await;
        let request = request_with_header(&basic_header("alice", "correct-pw"));

        assert!(matches!(
            service.authenticate(request).await.unwrap(),
            AuthResult::Rejected(DenyReason::AccountInactive)
        ));
    }

    #[tokio::test]
    async fn inactive_account_with_wrong_password_stays_generic() {
        let service = service_with_user("alice", "correct-pw", false).await;
        let request = request_with_header(&basic_header("alice", "wrong-pw"));

        assert!(matches!(
            service.authenticate(request).await.unwrap(),
            AuthResult::Rejected(DenyReason::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn query_param_credentials_are_accepted() {
        let service = service_with_user("alice", "correct-pw", true).await;
        let mut request = RequestAuth::default();
        request.query.insert("username".to_string(), "alice".to_string());
        request.query.insert("password".to_string(), "correct-pw".to_string());

        assert!(matches!(
            service.authenticate(request).await.unwrap(),
            AuthResult::Authenticated(_)
        ));
    }

    #[tokio::test]
    async fn duplicate_usernames_surface_as_integrity_fault() {
        let hasher = Argon2PasswordHasher;
        let password_hash = hasher.hash_password("pw").await.unwrap();
        let repo = FakeUserRepo::new();
        for _ in 0..2 {
            repo.insert(UserRecord {
                user_id: UserId(uuid::Uuid::new_v4()),
                username: "twin".to_string(),
                password_hash: password_hash.clone(),
                is_active: true,
            });
        }
        let service = BasicAuthService::new(Arc::new(repo), Arc::new(Argon2PasswordHasher));
        let request = request_with_header(&basic_header("twin", "pw"));

        assert!(matches!(
            service.authenticate(request).await,
            Err(AuthError::DataIntegrity(_))
        ));
    }

    #[tokio::test]
    async fn repeated_attempts_are_idempotent() {
        let service = service_with_user("alice", "correct-pw", true).await;

        for _ in 0..2 {
            let request = request_with_header(&basic_header("alice", "wrong-pw"));
            assert!(matches!(
                service.authenticate(request).await.unwrap(),
                AuthResult::Rejected(DenyReason::InvalidCredentials)
            ));
        }
        for _ in 0..2 {
            let request = request_with_header(&basic_header("alice", "correct-pw"));
            assert!(matches!(
                service.authenticate(request).await.unwrap(),
                AuthResult::Authenticated(_)
            ));
        }
    }
}
