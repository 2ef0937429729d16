//! Stateless HTTP request builder and response parser for the auth API.
//!
//! # Design
//! `AuthClient` holds only the service URL and public key and carries no
//! mutable state between calls. Each auth operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Session bookkeeping and the actual
//! round-trip live in `SupabaseClient`.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{PasswordCredentials, Session, User};

/// Synchronous, stateless client for the auth API.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: format!("{}/auth/v1", config.url()),
            anon_key: config.anon_key().to_string(),
        }
    }

    pub fn build_get_user(&self, access_token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/user", self.base_url),
            headers: self.authorized_headers(access_token),
            body: None,
        }
    }

    pub fn build_sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(credentials)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = self.base_headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/token?grant_type=password", self.base_url),
            headers,
            body: Some(body),
        })
    }

    pub fn build_sign_out(&self, access_token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/logout", self.base_url),
            headers: self.authorized_headers(access_token),
            body: None,
        }
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        let response = check_api_key(response)?;
        match response.status {
            200 => serde_json::from_str(&response.body)
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
            401 | 403 => Err(ApiError::Unauthorized {
                body: response.body,
            }),
            _ => Err(unexpected(response)),
        }
    }

    pub fn parse_sign_in(&self, response: HttpResponse) -> Result<Session, ApiError> {
        let response = check_api_key(response)?;
        match response.status {
            200 => serde_json::from_str(&response.body)
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
            400 | 401 => Err(ApiError::InvalidCredentials),
            _ => Err(unexpected(response)),
        }
    }

    /// A 401 means the token is already dead, which is what logout wants.
    pub fn parse_sign_out(&self, response: HttpResponse) -> Result<(), ApiError> {
        let response = check_api_key(response)?;
        match response.status {
            200 | 204 | 401 => Ok(()),
            _ => Err(unexpected(response)),
        }
    }

    fn base_headers(&self) -> Vec<(String, String)> {
        vec![("apikey".to_string(), self.anon_key.clone())]
    }

    fn authorized_headers(&self, access_token: &str) -> Vec<(String, String)> {
        let mut headers = self.base_headers();
        headers.push((
            "authorization".to_string(),
            format!("Bearer {access_token}"),
        ));
        headers
    }
}

/// The gateway answers 401 with an "API key" message when the anon key is
/// missing or wrong, before any token or credential is looked at.
fn check_api_key(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.status == 401 && response.body.contains("API key") {
        tracing::warn!("service rejected the API key");
        return Err(ApiError::InvalidApiKey {
            body: response.body,
        });
    }
    Ok(response)
}

fn unexpected(response: HttpResponse) -> ApiError {
    tracing::warn!(status = response.status, "unexpected auth response");
    ApiError::HttpError {
        status: response.status,
        body: response.body,
    }
}
