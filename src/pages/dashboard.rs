//! Dashboard page

use super::PageError;
use crate::models::DashboardStats;
use crate::services::Api;
use crate::session::AuthContext;
use crate::shell::render::render_cards;

/// What the dashboard currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Loading,
    Ready(DashboardStats),
    /// Full-page error state
    Failed(String),
}

pub struct DashboardPage {
    api: Api,
    auth: AuthContext,
    view: DashboardView,
}

impl DashboardPage {
    pub fn new(api: Api, auth: AuthContext) -> Self {
        Self {
            api,
            auth,
            view: DashboardView::Loading,
        }
    }

    pub async fn load(&mut self) -> Result<(), PageError> {
        self.view = DashboardView::Loading;
        match self.api.stats.dashboard().await {
            Ok(stats) => {
                self.view = DashboardView::Ready(stats);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load dashboard stats: {}", e);
                self.view = DashboardView::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn greeting(&self) -> String {
        match self.auth.user() {
            Some(user) => format!("Bienvenido, {} ({})", user.nombre, user.rol),
            None => "Bienvenido".to_string(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("Dashboard\n{}\n\n", self.greeting());
        match &self.view {
            DashboardView::Loading => out.push_str("Cargando...\n"),
            DashboardView::Ready(stats) => out.push_str(&render_cards(&stats.cards(), 3)),
            DashboardView::Failed(error) => {
                out = format!(
                    "No se pudieron cargar las estadísticas.\n\n{}\n",
                    error
                );
            }
        }
        out
    }
}
