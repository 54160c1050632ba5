//! Event categories

use serde::{Deserialize, Serialize};

use super::Id;

/// An event category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// Body of `POST /categorias` and `PUT /categorias/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryInput {
    pub nombre: String,
    pub descripcion: String,
}
