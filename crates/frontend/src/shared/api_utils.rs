//! API utilities for frontend-backend communication
//!
//! Resolves the API base once and wraps the authenticated request boilerplate.

use contracts::system::auth::Session;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::FormData;

/// Failure of an authenticated API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401; the session context treats it as logout
    #[error("Session expired, please sign in again")]
    SessionExpired,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("Failed to build request: {0}")]
    Request(String),
    #[error("Failed to send request: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

/// Get the base URL for API requests
///
/// Uses the compile-time `APP_API_BASE` when set, otherwise `<origin>/api`.
///
/// # Example
/// ```ignore
/// let url = format!("{}/payment-requests/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    if let Some(base) = option_env!("APP_API_BASE") {
        return base.trim_end_matches('/').to_string();
    }
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{}/api", origin)
}

/// Build a full API URL from a path relative to the API base
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Map an HTTP status to an error; 2xx passes
fn status_error(status: u16) -> Option<ApiError> {
    match status {
        401 => Some(ApiError::SessionExpired),
        200..=299 => None,
        other => Some(ApiError::Status(other)),
    }
}

fn check_status(response: &Response) -> Result<(), ApiError> {
    match status_error(response.status()) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// GET with bearer token, JSON body parsed into `T`
pub async fn get_json<T>(path: &str, session: &Session) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let response = Request::get(&api_url(path))
        .header("Authorization", &session.bearer())
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(&response)?;

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// DELETE with bearer token
pub async fn delete(path: &str, session: &Session) -> Result<(), ApiError> {
    let response = Request::delete(&api_url(path))
        .header("Authorization", &session.bearer())
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(&response)
}

/// POST multipart form with bearer token
pub async fn post_form(path: &str, session: &Session, form: FormData) -> Result<(), ApiError> {
    let response = Request::post(&api_url(path))
        .header("Authorization", &session.bearer())
        .body(form)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_its_own_variant() {
        assert_eq!(status_error(401), Some(ApiError::SessionExpired));
        assert!(ApiError::SessionExpired.is_session_expired());
        assert!(!ApiError::Status(403).is_session_expired());
    }

    #[test]
    fn test_other_statuses() {
        assert_eq!(status_error(200), None);
        assert_eq!(status_error(204), None);
        assert_eq!(status_error(404), Some(ApiError::Status(404)));
        assert_eq!(status_error(500).map(|e| e.to_string()), Some("HTTP 500".to_string()));
    }
}
