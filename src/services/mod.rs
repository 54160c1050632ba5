//! Resource Services
//!
//! One thin service per platform resource. Every operation is a direct
//! pass-through to a single HTTP call: inputs become query parameters or a
//! JSON body and the decoded response is returned verbatim.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/login`
//!
//! ## Users
//! - `GET /usuarios`, `GET /usuarios/buscar?email=`, `GET /usuarios/:id`
//! - `POST /usuarios`, `PUT /usuarios/:id`, `DELETE /usuarios/:id`
//! - `GET /usuarios/rol/:rol`, `GET /usuarios/stats/count`
//!
//! ## Events
//! - `GET /eventos`, `GET /eventos/buscar?q=`, `GET /eventos/:id`
//! - `POST /eventos`, `PUT /eventos/:id`, `DELETE /eventos/:id`
//! - `GET /eventos/disponibles`, `GET /eventos/categoria/:id`, `GET /eventos/todos`
//!
//! ## Categories
//! - `GET /categorias`, `POST /categorias`
//! - `GET /categorias/:id`, `PUT /categorias/:id`, `DELETE /categorias/:id`
//!
//! ## Enrollments
//! - `GET /inscripciones`, `POST /inscripciones`
//! - `GET /inscripciones/:id`, `PUT /inscripciones/:id`, `DELETE /inscripciones/:id`
//! - `GET /inscripciones/activas/:usuario_id`, `GET /inscripciones/historial/:usuario_id`
//!
//! ## Stats
//! - `GET /stats/dashboard`

mod auth;
mod categories;
mod enrollments;
mod events;
mod stats;
mod users;

pub use auth::AuthService;
pub use categories::CategoryService;
pub use enrollments::EnrollmentService;
pub use events::{EventQuery, EventService};
pub use stats::StatsService;
pub use users::UserService;

use crate::client::ApiClient;

/// All resource services sharing one client
#[derive(Clone)]
pub struct Api {
    pub auth: AuthService,
    pub users: UserService,
    pub events: EventService,
    pub categories: CategoryService,
    pub enrollments: EnrollmentService,
    pub stats: StatsService,
}

impl Api {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            users: UserService::new(client.clone()),
            events: EventService::new(client.clone()),
            categories: CategoryService::new(client.clone()),
            enrollments: EnrollmentService::new(client.clone()),
            stats: StatsService::new(client),
        }
    }
}
