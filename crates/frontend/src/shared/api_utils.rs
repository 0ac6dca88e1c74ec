//! API utilities for console-backend communication
//!
//! Provides helper functions for constructing API URLs and sending requests.

use crate::shared::error::ApiError;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Port of the inventory API on the console's host.
pub const API_PORT: u16 = 3000;

/// Path prefix of every API endpoint.
pub const API_PREFIX: &str = "/api";

/// Upper bound for a single list fetch before the level is marked failed.
pub const FETCH_TIMEOUT_MS: u32 = 15_000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using [`API_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000/api"
/// - Just the prefix if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return API_PREFIX.to_string(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}{}", protocol, hostname, API_PORT, API_PREFIX)
}

/// Build a full API URL from a path relative to [`API_PREFIX`]
///
/// # Example
/// ```rust,ignore
/// let url = api_url("machines?factorySection=4");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}/{}", api_base(), path.trim_start_matches('/'))
}

/// Same as [`api_url`] with a cache buster, so a refetch after a mutation
/// never gets a cached list back.
pub fn api_list_url(path: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}_ts={}", api_url(path), sep, js_sys::Date::now() as i64)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET` a JSON list
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = api_list_url(path);
    log::debug!("GET {}", url);
    let response = Request::get(&url)
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

/// `POST` or `PUT` a JSON body, ignoring the response body
pub async fn send_json<B: Serialize>(method: &str, path: &str, body: &B) -> Result<(), ApiError> {
    let url = api_url(path);
    log::debug!("{} {}", method, url);
    let builder = match method {
        "PUT" => Request::put(&url),
        _ => Request::post(&url),
    };
    let response = builder
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(())
}

/// `DELETE` returning the server's boolean answer
pub async fn delete(path: &str) -> Result<bool, ApiError> {
    let url = api_url(path);
    log::debug!("DELETE {}", url);
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    // an empty 2xx body counts as success
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(true);
    }
    serde_json::from_str::<bool>(text.trim()).map_err(|e| ApiError::Decode(e.to_string()))
}
