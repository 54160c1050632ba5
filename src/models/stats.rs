//! Dashboard aggregates

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of `GET /stats/dashboard`
///
/// Counters the backend adds beyond the known ones are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_eventos: u64,
    #[serde(default)]
    pub eventos_activos: u64,
    #[serde(default)]
    pub total_usuarios: u64,
    #[serde(default)]
    pub total_inscripciones: u64,
    #[serde(default)]
    pub total_categorias: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DashboardStats {
    /// Labelled counters in display order
    pub fn cards(&self) -> Vec<(String, String)> {
        let mut cards = vec![
            ("Total Eventos".to_string(), self.total_eventos.to_string()),
            ("Eventos Activos".to_string(), self.eventos_activos.to_string()),
            ("Usuarios".to_string(), self.total_usuarios.to_string()),
            ("Inscripciones".to_string(), self.total_inscripciones.to_string()),
            ("Categorías".to_string(), self.total_categorias.to_string()),
        ];

        for (key, value) in &self.extra {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            cards.push((key.replace('_', " "), value));
        }

        cards
    }
}

/// Response of `GET /usuarios/stats/count`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCount {
    #[serde(alias = "count")]
    pub total: u64,
}
