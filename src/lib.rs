//! # Event Manager
//!
//! Administrative console for the events platform API: users, events,
//! categories and enrollments, plus a statistics dashboard.
//!
//! ## Modules
//!
//! - [`client`]: HTTP client with bearer auth and the unauthenticated signal
//! - [`services`]: one thin service per platform resource
//! - [`session`]: persisted session and the authentication state machine
//! - [`pages`]: page controllers (list, search, filter, create/edit dialog)
//! - [`shell`]: routing, guard, 401 observer, toasts and text rendering
//! - [`filter`]: client-side row filtering shared by the pages
//! - [`config`], [`logging`]: ambient setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use event_manager::{ApiClient, Config, FileSessionStore, Shell};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let store = Arc::new(FileSessionStore::new(&config.session.file));
//!     let client = ApiClient::new(&config.api, store)?;
//!
//!     let mut shell = Shell::new(client);
//!     shell.boot();
//!     shell.login("admin@example.com", "secret").await;
//!     shell.navigate("/eventos").await;
//!     println!("{}", shell.render());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod filter;
pub mod logging;
pub mod models;
pub mod pages;
pub mod services;
pub mod session;
pub mod shell;

#[cfg(test)]
mod test_support;

// Re-export top-level types for convenience
pub use client::{ApiClient, ApiError, ApiResult, ClientEvent};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

pub use models::{
    Category, CategoryInput, DashboardStats, Enrollment, EnrollmentInput, Event, EventInput, Id,
    LoginCredentials, Rol, User, UserInput, UserUpdate,
};

pub use pages::{PageError, ResourcePage};

pub use services::Api;

pub use session::{
    AuthContext, AuthError, AuthState, FileSessionStore, MemorySessionStore, SessionError,
    SessionStore,
};

pub use shell::{Command, Flow, Route, Shell};
