//! HTTP Client Wrapper
//!
//! Transport for every call the console makes to the events platform API.
//!
//! ## Behavior
//!
//! - Requests go to `<base_url><path>` with a JSON content type
//! - `Authorization: Bearer <token>` is attached when the session store
//!   holds a token
//! - A 401 response is broadcast as [`ClientEvent::Unauthenticated`]; the
//!   shell observes it and performs the forced logout and redirect
//! - Every other failure propagates to the caller unchanged

mod error;
mod http;

pub use error::{extract_detail, ApiError, ApiResult};
pub use http::ApiClient;

/// Signals the client emits for the application shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEvent {
    /// The backend rejected the current credentials (HTTP 401)
    Unauthenticated,
}
