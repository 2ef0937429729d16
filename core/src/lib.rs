//! Async client core for a hosted auth service.
//!
//! # Overview
//! `SupabaseClient` is the one handle an application builds at startup,
//! from an explicit `ClientConfig`, and passes to whatever needs it.
//! `get_user_information` reads the signed-in user's metadata through it,
//! and `FORM_ACTION_DEFAULT` is the template for form submission state.
//!
//! # Design
//! - `AuthClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse` (host-does-IO pattern).
//! - `Transport` executes the round-trip; `ReqwestTransport` in production,
//!   canned transports in tests.
//! - A missing session is `ApiError::NoActiveSession`, never a panic.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;
pub mod user;

pub use client::AuthClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, TransportError};
pub use form::{FormActionState, FORM_ACTION_DEFAULT};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::SupabaseClient;
pub use transport::{ReqwestTransport, Transport};
pub use types::{PasswordCredentials, Session, User, UserMetadata, UserResponse};
pub use user::get_user_information;
