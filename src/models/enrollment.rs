//! Enrollments ("inscripciones")

use serde::{Deserialize, Serialize};

use super::Id;

/// Binding of one user to one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Id,
    pub usuario_id: Id,
    pub evento_id: Id,
    #[serde(default)]
    pub fecha_inscripcion: String,
}

/// Body of `POST /inscripciones` and `PUT /inscripciones/:id`
///
/// Missing references are omitted and left for the backend to reject.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrollmentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evento_id: Option<Id>,
    pub fecha_inscripcion: String,
}
