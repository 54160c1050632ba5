//! Events

use serde::{Deserialize, Serialize};

use super::{Category, Id};

/// An event users can enroll in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    #[serde(default)]
    pub lugar: String,
    /// Maximum number of enrollments the event accepts
    pub cupos: u32,
    #[serde(default)]
    pub categoria_id: Option<Id>,
    /// Denormalized category, display only
    #[serde(default)]
    pub categoria: Option<Category>,
}

impl Event {
    /// Name of the embedded category, empty when absent
    pub fn category_name(&self) -> &str {
        self.categoria
            .as_ref()
            .map(|c| c.nombre.as_str())
            .unwrap_or("")
    }
}

/// Body of `POST /eventos` and `PUT /eventos/:id`
///
/// Never carries the embedded category; an unset category is omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventInput {
    pub nombre: String,
    pub descripcion: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub lugar: String,
    pub cupos: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<Id>,
}
