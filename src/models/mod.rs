//! Platform Data Model
//!
//! DTOs exchanged with the events platform API. Field names follow the
//! backend's wire format; the console treats these as opaque records and
//! never enforces the backend's invariants itself.
//!
//! - **user**: `User`, `Rol` and the user write payloads
//! - **category**: `Category` and its write payload
//! - **event**: `Event` and its write payload
//! - **enrollment**: `Enrollment` ("inscripción") and its write payload
//! - **stats**: dashboard aggregates

mod category;
mod enrollment;
mod event;
mod stats;
mod user;

pub use category::{Category, CategoryInput};
pub use enrollment::{Enrollment, EnrollmentInput};
pub use event::{Event, EventInput};
pub use stats::{DashboardStats, UserCount};
pub use user::{LoginCredentials, LoginResponse, Rol, User, UserInput, UserUpdate};

/// Server-assigned record identifier
pub type Id = i64;

/// Pagination parameters accepted by the list endpoints
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListParams {
    /// A single page of `limit` rows starting at `skip`
    pub fn page(skip: u32, limit: u32) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }
}
