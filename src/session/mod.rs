//! Session Management
//!
//! Persisted credentials and the authentication state machine.
//!
//! - **store**: token/user persistence (file or memory)
//! - **auth**: `AuthContext`, the loading → authenticated/unauthenticated
//!   lifecycle shared by every page

mod auth;
mod store;

pub use auth::{AuthContext, AuthError, AuthState};
pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
