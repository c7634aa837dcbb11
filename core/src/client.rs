//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` (the API root, `/api` in the
//! browser) and carries no mutable state between calls. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. Protected calls take the
//! bearer token as `Option<&str>`; with `None` the `Authorization` header is
//! omitted entirely.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AuthResponse, Credentials, Task, TaskInput};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- auth ---

    pub fn build_login(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/auth/login", None, credentials)
    }

    pub fn build_register(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/auth/register", None, credentials)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    /// The register endpoint answers with plain text; hand it back as-is.
    pub fn parse_register(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }

    // --- tasks ---

    pub fn build_list_tasks(&self, token: Option<&str>) -> HttpRequest {
        self.bare_request(HttpMethod::Get, "/todos".to_string(), token)
    }

    pub fn build_get_task(&self, id: i64, token: Option<&str>) -> HttpRequest {
        self.bare_request(HttpMethod::Get, format!("/todos/{id}"), token)
    }

    pub fn build_create_task(&self, input: &TaskInput, token: Option<&str>) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/todos", token, input)
    }

    pub fn build_update_task(
        &self,
        id: i64,
        input: &TaskInput,
        token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/todos/{id}"), token, input)
    }

    pub fn build_delete_task(&self, id: i64, token: Option<&str>) -> HttpRequest {
        self.bare_request(HttpMethod::Delete, format!("/todos/{id}"), token)
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    /// The delete body is a human-readable confirmation and is ignored.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bare_request(&self, method: HttpMethod, path: String, token: Option<&str>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: auth_headers(token),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        headers.extend(auth_headers(token));
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body: Some(body),
        })
    }
}

fn auth_headers(token: Option<&str>) -> Vec<(String, String)> {
    match token {
        Some(token) => vec![("authorization".to_string(), format!("Bearer {token}"))],
        None => Vec::new(),
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(match response.status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden(response.body.clone()),
        404 => ApiError::NotFound,
        status => ApiError::HttpError {
            status,
            body: response.body.clone(),
        },
    })
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
