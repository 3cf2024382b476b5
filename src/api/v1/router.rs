use super::error::*;
use super::handler;
use crate::application_port::{AuthResult, AuthService, AuthUser, DenyReason, RequestAuth};
use crate::server::Server;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let list_employees = warp::get()
        .and(warp::path("employees"))
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(with(server.employee_service.clone()))
        .and_then(handler::list_employees);

    let create_employee = warp::post()
        .and(warp::path("employees"))
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(warp::body::json())
        .and(with(server.employee_service.clone()))
        .and_then(handler::create_employee);

    let get_employee = warp::get()
        .and(warp::path("employees"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(with(server.employee_service.clone()))
        .and_then(handler::get_employee);

    let update_employee = warp::put()
        .and(warp::path("employees"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(warp::body::json())
        .and(with(server.employee_service.clone()))
        .and_then(handler::update_employee);

    let delete_employee = warp::delete()
        .and(warp::path("employees"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(with(server.employee_service.clone()))
        .and_then(handler::delete_employee);

    let list_projects = warp::get()
        .and(warp::path("projects"))
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(with(server.project_service.clone()))
        .and_then(handler::list_projects);

    let create_project = warp::post()
        .and(warp::path("projects"))
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(warp::body::json())
        .and(with(server.project_service.clone()))
        .and_then(handler::create_project);

    let get_project = warp::get()
        .and(warp::path("projects"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(with(server.project_service.clone()))
        .and_then(handler::get_project);

    let update_project = warp::put()
        .and(warp::path("projects"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(warp::body::json())
        .and(with(server.project_service.clone()))
        .and_then(handler::update_project);

    let delete_project = warp::delete()
        .and(warp::path("projects"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(with_authentication(server.auth_service.clone()))
        .and(with(server.project_service.clone()))
        .and_then(handler::delete_project);

    list_employees
        .or(create_employee)
        .or(get_employee)
        .or(update_employee)
        .or(delete_employee)
        .or(list_projects)
        .or(create_project)
        .or(get_project)
        .or(update_project)
        .or(delete_project)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Runs the authenticator ahead of every protected route. A `Rejected` or
/// `Anonymous` outcome short-circuits into a 401 rejection; handlers only
/// ever see an `AuthUser`.
fn with_authentication(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (AuthUser,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and(warp::query::<HashMap<String, String>>())
        .and_then(
            move |authorization: Option<String>, query: HashMap<String, String>| {
                let auth_service = auth_service.clone();
                async move {
                    let request = RequestAuth {
                        authorization,
                        query,
                        form: HashMap::new(),
                    };
                    match auth_service.authenticate(request).await {
                        Ok(AuthResult::Authenticated(user)) => Ok(user),
                        Ok(AuthResult::Anonymous) => Err(reject::custom(ApiError::from(
                            DenyReason::AuthenticationRequired,
                        ))),
                        Ok(AuthResult::Rejected(reason)) => {
                            Err(reject::custom(ApiError::from(reason)))
                        }
                        Err(error) => Err(reject::custom(ApiError::from(error))),
                    }
                }
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::{Argon2PasswordHasher, BasicAuthService, FakeUserRepo};
    use crate::application_port::CredentialHasher;
    use crate::domain_model::UserId;
    use crate::domain_port::UserRecord;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use warp::http::StatusCode;

    async fn auth_service() -> Arc<dyn AuthService> {
        let hasher = Argon2PasswordHasher;
        let password_hash = hasher.hash_password("correct-pw").await.unwrap();
        let repo = FakeUserRepo::new();
        repo.insert(UserRecord {
            user_id: UserId(uuid::Uuid::new_v4()),
            username: "alice".to_string(),
            password_hash,
            is_active: true,
        });
        Arc::new(BasicAuthService::new(
            Arc::new(repo),
            Arc::new(Argon2PasswordHasher),
        ))
    }

    fn gate(
        auth: Arc<dyn AuthService>,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone {
        warp::path("whoami")
            .and(with_authentication(auth))
            .map(|user: AuthUser| warp::reply::json(&user.username))
            .recover(recover_error)
    }

    fn basic_header(username: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
    }

    #[tokio::test]
    async fn allows_valid_basic_credentials() {
        let filter = gate(auth_service().await);
        let response = warp::test::request()
            .path("/whoami")
            .header("authorization", basic_header("alice", "correct-pw"))
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "\"alice\"");
    }

    #[tokio::test]
    async fn missing_credentials_get_401_with_detail() {
        let filter = gate(auth_service().await);
        let response = warp::test::request().path("/whoami").reply(&filter).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body(),
            "{\"detail\":\"authentication required\"}"
        );
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let filter = gate(auth_service().await);

        let ghost = warp::test::request()
            .path("/whoami")
            .header("authorization", basic_header("ghost", "anything"))
            .reply(&filter)
            .await;
        let mismatch = warp::test::request()
            .path("/whoami")
            .header("authorization", basic_header("alice", "wrong-pw"))
            .reply(&filter)
            .await;

        assert_eq!(ghost.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(mismatch.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ghost.body(), mismatch.body());
        assert_eq!(
            ghost.body(),
            "{\"detail\":\"invalid username or password\"}"
        );
    }

    #[tokio::test]
    async fn wrong_scheme_is_a_401_not_a_crash() {
        let filter = gate(auth_service().await);
        let response = warp::test::request()
            .path("/whoami")
            .header("authorization", "Bearer abc123")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.body(), "{\"detail\":\"malformed credentials\"}");
    }

    #[tokio::test]
    async fn invalid_base64_is_a_401_with_detail() {
        let filter = gate(auth_service().await);
        let response = warp::test::request()
            .path("/whoami")
            .header("authorization", "Basic not!base64")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.body(), "{\"detail\":\"malformed credentials\"}");
    }

    #[tokio::test]
    async fn query_param_fallback_authenticates() {
        let filter = gate(auth_service().await);
        let response = warp::test::request()
            .path("/whoami?username=alice&password=correct-pw")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
