use crate::application_port::{AuthError, DenyReason, EmployeeError, ProjectError};
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

/// Externally visible failure for any endpoint. Every variant renders as
/// `{ "detail": <message> }` with its status; internal causes are logged,
/// never echoed to the client.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("malformed credentials")]
    MalformedCredentials,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("account inactive")]
    AccountInactive,
    #[error("{0}")]
    Validation(String),
    #[error("not found")]
    NotFound,
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AuthenticationRequired
            | ApiError::MalformedCredentials
            | ApiError::InvalidCredentials
            | ApiError::AccountInactive => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal<E: std::fmt::Display>(error: E) -> ApiError {
        warn!("Internal error: {}", error);
        ApiError::Internal
    }
}

impl reject::Reject for ApiError {}

impl From<DenyReason> for ApiError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::AuthenticationRequired => ApiError::AuthenticationRequired,
            DenyReason::MalformedCredentials => ApiError::MalformedCredentials,
            DenyReason::InvalidCredentials => ApiError::InvalidCredentials,
            DenyReason::AccountInactive => ApiError::AccountInactive,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        // Integrity faults included: operators see the cause in the log,
        // clients only ever see a generic 500.
        ApiError::internal(error)
    }
}

impl From<EmployeeError> for ApiError {
    fn from(error: EmployeeError) -> Self {
        match error {
            EmployeeError::Validation(_) | EmployeeError::DuplicateName => {
                ApiError::Validation(error.to_string())
            }
            EmployeeError::NotFound => ApiError::NotFound,
            EmployeeError::Store(e) => ApiError::internal(e),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(error: ProjectError) -> Self {
        match error {
            ProjectError::Validation(_)
            | ProjectError::DuplicateTitle
            | ProjectError::EmployeeNotFound => ApiError::Validation(error.to_string()),
            ProjectError::NotFound => ApiError::NotFound,
            ProjectError::Store(e) => ApiError::internal(e),
        }
    }
}

#[derive(Debug, Serialize)]
struct Detail {
    detail: String,
}

fn reply_detail(detail: String, status: StatusCode) -> impl warp::Reply {
    warp::reply::with_status(warp::reply::json(&Detail { detail }), status)
}

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(api_error) = err.find::<ApiError>() {
        return Ok(reply_detail(api_error.to_string(), api_error.status()));
    }
    if err.is_not_found() {
        return Ok(reply_detail("not found".to_string(), StatusCode::NOT_FOUND));
    }
    if let Some(body_error) = err.find::<warp::filters::body::BodyDeserializeError>() {
        return Ok(reply_detail(body_error.to_string(), StatusCode::BAD_REQUEST));
    }
    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(reply_detail(
            "method not allowed".to_string(),
            StatusCode::METHOD_NOT_ALLOWED,
        ));
    }

    warn!("Unhandled rejection: {:?}", err);
    Ok(reply_detail(
        "internal error".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}
