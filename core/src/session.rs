//! The shared client handle.
//!
//! # Design
//! `SupabaseClient` is built once from an explicit `ClientConfig` and handed
//! to whoever needs it; clones share one session slot. Construction never
//! touches the network. The session lock is held only to copy the token out,
//! never across an await on the transport.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::client::AuthClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{PasswordCredentials, Session, UserResponse};

/// Configured, cloneable handle to the hosted backend.
pub struct SupabaseClient<T = ReqwestTransport> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    config: ClientConfig,
    auth: AuthClient,
    transport: T,
    session: RwLock<Option<Session>>,
}

impl<T> Clone for SupabaseClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SupabaseClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Build a client from `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> SupabaseClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let auth = AuthClient::new(&config);
        Self {
            inner: Arc::new(Inner {
                config,
                auth,
                transport,
                session: RwLock::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub async fn session(&self) -> Option<Session> {
        self.inner.session.read().await.clone()
    }

    pub async fn set_session(&self, session: Session) {
        *self.inner.session.write().await = Some(session);
    }

    pub async fn clear_session(&self) {
        *self.inner.session.write().await = None;
    }

    /// Fetch the user behind the current session.
    ///
    /// Resolves to `user: None` without a request when no session is stored,
    /// and when the service rejects the stored token.
    pub async fn get_user(&self) -> Result<UserResponse, ApiError> {
        let Some(token) = self.access_token().await else {
            debug!("get_user called without a session");
            return Ok(UserResponse { user: None });
        };

        let request = self.inner.auth.build_get_user(&token);
        let response = self.inner.transport.execute(request).await?;
        match self.inner.auth.parse_get_user(response) {
            Ok(user) => Ok(UserResponse { user: Some(user) }),
            Err(ApiError::Unauthorized { .. }) => {
                debug!("stored session was rejected");
                Ok(UserResponse { user: None })
            }
            Err(e) => Err(e),
        }
    }

    /// Password sign-in. The returned session also becomes this client's.
    pub async fn sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<Session, ApiError> {
        let request = self.inner.auth.build_sign_in_with_password(credentials)?;
        let response = self.inner.transport.execute(request).await?;
        let session = self.inner.auth.parse_sign_in(response)?;
        debug!(email = %credentials.email, "signed in");
        self.set_session(session.clone()).await;
        Ok(session)
    }

    /// Revoke the current session remotely and forget it locally.
    ///
    /// The local session is kept only if the request never reached the
    /// service.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let Some(token) = self.access_token().await else {
            return Ok(());
        };

        let request = self.inner.auth.build_sign_out(&token);
        let response = self.inner.transport.execute(request).await?;
        self.clear_session().await;
        self.inner.auth.parse_sign_out(response)
    }

    async fn access_token(&self) -> Option<String> {
        self.inner
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }
}
