//! Authentication State
//!
//! `AuthContext` owns the login lifecycle:
//!
//! ```text
//! Loading(stored user?) ──restore──> Authenticated(user) | Unauthenticated
//! Unauthenticated ──login ok──> Authenticated(user)
//! any ──logout / expire──> Unauthenticated
//! ```
//!
//! Every transition is published on a `watch` channel so the shell and the
//! pages observe the same state.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use super::store::{SessionError, SessionStore};
use crate::client::ApiError;
use crate::models::{LoginCredentials, User};
use crate::services::AuthService;

/// Authentication state observed by the console
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Session not yet settled; carries the optimistically restored user
    Loading(Option<User>),
    Authenticated(User),
    Unauthenticated,
}

impl AuthState {
    /// User known in this state, settled or not
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Loading(user) => user.as_ref(),
            AuthState::Authenticated(user) => Some(user),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading(_))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Shared authentication context
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn SessionStore>,
    service: AuthService,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthContext {
    /// Create a context in the `Loading(None)` state
    pub fn new(store: Arc<dyn SessionStore>, service: AuthService) -> Self {
        let (state, _) = watch::channel(AuthState::Loading(None));
        Self {
            store,
            service,
            state: Arc::new(state),
        }
    }

    /// Settle the state from the persisted session
    ///
    /// A stored user is published first as `Loading(Some(user))`. A session
    /// missing either the token or the user is discarded.
    pub fn restore(&self) -> AuthState {
        let user = self.store.user();
        if user.is_some() {
            self.publish(AuthState::Loading(user.clone()));
        }

        let settled = match (self.store.token(), user) {
            (Some(_), Some(user)) => AuthState::Authenticated(user),
            (None, None) => AuthState::Unauthenticated,
            _ => {
                tracing::debug!("Discarding incomplete stored session");
                if let Err(e) = self.store.clear() {
                    tracing::warn!("Failed to clear stored session: {}", e);
                }
                AuthState::Unauthenticated
            }
        };

        self.publish(settled.clone());
        settled
    }

    /// Exchange credentials for a session
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        let response = match self.service.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::info!(email = %credentials.email, "Login rejected: {}", e);
                self.publish(AuthState::Unauthenticated);
                return Err(e.into());
            }
        };

        self.store.save(&response.access_token, &response.user)?;
        tracing::info!(user_id = response.user.id, rol = %response.user.rol, "Logged in");

        self.publish(AuthState::Authenticated(response.user.clone()));
        Ok(response.user)
    }

    /// Forget the session locally
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.publish(AuthState::Unauthenticated);
        tracing::info!("Logged out");
        Ok(())
    }

    /// Drop the session after the backend rejected the token
    pub fn expire(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear expired session: {}", e);
        }
        self.publish(AuthState::Unauthenticated);
        tracing::warn!("Session expired, login required");
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .borrow()
            .user()
            .map(User::is_admin)
            .unwrap_or(false)
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    fn publish(&self, state: AuthState) {
        self.state.send_replace(state);
    }
}

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl AuthError {
    /// Message shown to the user, with `fallback` for unexpected failures
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Api(e) => e.user_message(fallback),
            AuthError::Session(_) => fallback.to_string(),
        }
    }
}
