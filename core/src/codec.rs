//! Stateless request builders and response parsers for the category API.
//!
//! # Design
//! Each operation is split into a `build_*` function that produces an
//! `HttpRequest` and a `parse_*` function that consumes an `HttpResponse`.
//! Reads go to the public `/categories` routes, writes to the
//! `/admin/categories` routes. Nothing here performs I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ErrorPayload};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Category, CategoryId, CategoryInput};

const PUBLIC_PATH: &str = "/categories";
const ADMIN_PATH: &str = "/admin/categories";

pub fn build_list_categories() -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path: PUBLIC_PATH.to_string(),
        headers: Vec::new(),
        body: None,
    }
}

pub fn build_get_category(id: CategoryId) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path: format!("{PUBLIC_PATH}/{id}"),
        headers: Vec::new(),
        body: None,
    }
}

pub fn build_create_category(input: &CategoryInput) -> Result<HttpRequest, ApiError> {
    json_request(HttpMethod::Post, ADMIN_PATH.to_string(), input)
}

pub fn build_update_category(id: CategoryId, input: &CategoryInput) -> Result<HttpRequest, ApiError> {
    json_request(HttpMethod::Put, format!("{ADMIN_PATH}/{id}"), input)
}

pub fn build_delete_category(id: CategoryId) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Delete,
        path: format!("{ADMIN_PATH}/{id}"),
        headers: Vec::new(),
        body: None,
    }
}

pub fn parse_list_categories(response: HttpResponse) -> Result<Vec<Category>, ApiError> {
    check_status(&response)?;
    decode(&response.body)
}

pub fn parse_get_category(response: HttpResponse) -> Result<Category, ApiError> {
    check_status(&response)?;
    decode(&response.body)
}

pub fn parse_create_category(response: HttpResponse) -> Result<Category, ApiError> {
    check_status(&response)?;
    decode(&response.body)
}

/// Servers may answer an update with the updated category or with an empty
/// success (typically 204); the latter yields `None`.
pub fn parse_update_category(response: HttpResponse) -> Result<Option<Category>, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    decode(&response.body).map(Some)
}

/// Any success body is discarded.
pub fn parse_delete_category(response: HttpResponse) -> Result<(), ApiError> {
    check_status(&response)
}

fn json_request<T: Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let payload = ErrorPayload::from_body(&response.body);
    if response.status == 404 {
        return Err(ApiError::NotFound { payload });
    }
    Err(ApiError::HttpError {
        status: response.status,
        payload,
    })
}
