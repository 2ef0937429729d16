//! Wire DTOs for the auth endpoints.
//!
//! # Design
//! These mirror the shapes the hosted auth service returns but are defined
//! independently from the mock-server crate. Integration tests catch any
//! schema drift between the two. Unknown fields are ignored so server-side
//! additions do not break parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Arbitrary key/value profile data owned by the auth service.
pub type UserMetadata = Map<String, Value>;

/// An authenticated user as returned by `GET /auth/v1/user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub app_metadata: UserMetadata,
}

/// Tokens issued by a successful sign-in.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("user", &self.user.as_ref().map(|u| u.id))
            .finish()
    }
}

/// Result of `SupabaseClient::get_user`: `user` is `None` when nobody is
/// signed in or the service no longer accepts the session's token.
#[derive(Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub user: Option<User>,
}

/// Request payload for the password grant.
#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
