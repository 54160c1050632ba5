//! Console Shell
//!
//! The shell owns everything the pages share:
//! - the route table and the authentication guard
//! - the single observer of the client's `Unauthenticated` signal, which
//!   expires the session and returns to `/login`
//! - the toast queue, drained after each action
//! - the top bar and the text rendering of the current screen

pub mod command;
pub mod render;
mod routes;
mod toast;

pub use command::{Command, HELP};
pub use routes::{guard, Route};
pub use toast::{Toast, ToastKind, Toasts};

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::client::{ApiClient, ClientEvent};
use crate::models::Id;
use crate::pages::{
    CategoriasPage, DashboardPage, EventosPage, InscripcionesPage, LoginPage, PageError,
    ResourcePage, UsuariosPage, LOGIN_SUCCESS,
};
use crate::services::Api;
use crate::session::{AuthContext, AuthState};

pub const APP_TITLE: &str = "Event Manager";
pub const SESSION_EXPIRED: &str = "Su sesión ha expirado. Inicie sesión nuevamente.";

/// Whether the console keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    api: Api,
    auth: AuthContext,
    client_events: broadcast::Receiver<ClientEvent>,
    route: Route,
    toasts: Toasts,
    login: LoginPage,
    dashboard: DashboardPage,
    usuarios: UsuariosPage,
    eventos: EventosPage,
    categorias: CategoriasPage,
    inscripciones: InscripcionesPage,
}

impl Shell {
    pub fn new(client: ApiClient) -> Self {
        let client_events = client.subscribe();
        let api = Api::new(client.clone());
        let auth = AuthContext::new(client.store().clone(), api.auth.clone());

        Self {
            login: LoginPage::new(auth.clone()),
            dashboard: DashboardPage::new(api.clone(), auth.clone()),
            usuarios: UsuariosPage::new(api.clone()),
            eventos: EventosPage::new(api.clone()),
            categorias: CategoriasPage::new(api.clone(), auth.clone()),
            inscripciones: InscripcionesPage::new(api.clone(), auth.clone()),
            api,
            auth,
            client_events,
            route: Route::Dashboard,
            toasts: Toasts::default(),
        }
    }

    /// Restore the persisted session and apply the guard
    pub fn boot(&mut self) -> AuthState {
        let state = self.auth.restore();
        if let Some(redirect) = guard(&self.route, &state) {
            self.route = redirect;
        }
        tracing::debug!(route = %self.route, "Console booted");
        state
    }

    /// Drop every page's search, filters, rows and open dialog
    ///
    /// Runs whenever the session changes hands.
    fn reset_pages(&mut self) {
        let (api, auth) = (self.api.clone(), self.auth.clone());
        self.login = LoginPage::new(auth.clone());
        self.dashboard = DashboardPage::new(api.clone(), auth.clone());
        self.usuarios = UsuariosPage::new(api.clone());
        self.eventos = EventosPage::new(api.clone());
        self.categorias = CategoriasPage::new(api.clone(), auth.clone());
        self.inscripciones = InscripcionesPage::new(api, auth);
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn dashboard(&self) -> &DashboardPage {
        &self.dashboard
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Resource page behind a route
    pub fn page(&self, route: &Route) -> Option<&dyn ResourcePage> {
        match route {
            Route::Usuarios => Some(&self.usuarios),
            Route::Eventos => Some(&self.eventos),
            Route::Categorias => Some(&self.categorias),
            Route::Inscripciones => Some(&self.inscripciones),
            _ => None,
        }
    }

    fn page_mut(&mut self, route: &Route) -> Option<&mut dyn ResourcePage> {
        match route {
            Route::Usuarios => Some(&mut self.usuarios),
            Route::Eventos => Some(&mut self.eventos),
            Route::Categorias => Some(&mut self.categorias),
            Route::Inscripciones => Some(&mut self.inscripciones),
            _ => None,
        }
    }

    fn current_page(&mut self) -> Result<&mut dyn ResourcePage, PageError> {
        let route = self.route.clone();
        self.page_mut(&route).ok_or_else(|| {
            PageError::Validation(format!("La ruta {} no tiene una lista", route))
        })
    }

    // ============================================
    // Navigation and session
    // ============================================

    /// Go to `path`, subject to the guard, and load the page
    pub async fn navigate(&mut self, path: &str) -> &Route {
        let target = Route::from_path(path);
        self.route = guard(&target, &self.auth.current()).unwrap_or(target);
        tracing::debug!(route = %self.route, "Navigate");

        let route = self.route.clone();
        let result = match route {
            Route::Dashboard => self.dashboard.load().await,
            Route::Usuarios | Route::Eventos | Route::Categorias | Route::Inscripciones => {
                match self.page_mut(&route) {
                    Some(page) => page.load().await,
                    None => Ok(()),
                }
            }
            Route::Login | Route::NotFound(_) => Ok(()),
        };
        self.report(result.map(|_| None));
        &self.route
    }

    /// Drain the client's signals; returns whether the session was expired
    ///
    /// Any 401 clears the stored session and forces `/login`, whichever
    /// page issued the call.
    pub fn process_events(&mut self) -> bool {
        let mut unauthenticated = false;
        loop {
            match self.client_events.try_recv() {
                Ok(ClientEvent::Unauthenticated) => unauthenticated = true,
                // Only one kind of event exists, so a lagged receiver missed 401s
                Err(TryRecvError::Lagged(_)) => unauthenticated = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if !unauthenticated {
            return false;
        }

        // A rejected login arrives here with no session to expire
        let had_session = !matches!(self.auth.current(), AuthState::Unauthenticated);
        if had_session {
            self.auth.expire();
            self.reset_pages();
            self.toasts.error(SESSION_EXPIRED);
        }
        self.route = Route::Login;
        had_session
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let fields = self
            .login
            .set_field("email", email)
            .and_then(|_| self.login.set_field("password", password));
        if let Err(e) = fields {
            return self.report(Err(e));
        }
        self.submit_login().await
    }

    async fn submit_login(&mut self) -> bool {
        let result = self.login.submit().await;
        self.process_events();

        match result {
            Ok(user) => {
                self.reset_pages();
                self.toasts.success(LOGIN_SUCCESS);
                tracing::info!(user = %user.email, "Console session started");
                self.navigate("/").await;
                true
            }
            Err(e) => {
                self.route = Route::Login;
                self.toasts.error(e.to_string());
                false
            }
        }
    }

    pub fn logout(&mut self) {
        let result = self
            .auth
            .logout()
            .map(|_| Some("Sesión cerrada".to_string()))
            .map_err(|e| PageError::Validation(e.to_string()));
        self.report(result);
        self.reset_pages();
        self.route = Route::Login;
    }

    // ============================================
    // Page actions
    // ============================================

    pub async fn search(&mut self, text: &str) -> bool {
        let result = match self.current_page() {
            Ok(page) => page.set_search(text).await.map(|_| None),
            Err(e) => Err(e),
        };
        self.report(result)
    }

    pub async fn filter(&mut self, name: &str, value: &str) -> bool {
        let result = match self.current_page() {
            Ok(page) => page.set_filter(name, value).await.map(|_| None),
            Err(e) => Err(e),
        };
        self.report(result)
    }

    pub fn add(&mut self) -> bool {
        let result = self
            .current_page()
            .and_then(|page| page.open_create())
            .map(|_| None);
        self.report(result)
    }

    pub fn edit(&mut self, id: Id) -> bool {
        let result = self
            .current_page()
            .and_then(|page| page.open_edit(id))
            .map(|_| None);
        self.report(result)
    }

    /// Set a field of the open form (or of the login form on `/login`)
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let result = if self.route == Route::Login {
            self.login.set_field(name, value)
        } else {
            self.current_page()
                .and_then(|page| page.set_field(name, value))
        };
        self.report(result.map(|_| None))
    }

    pub async fn save(&mut self) -> bool {
        if self.route == Route::Login {
            return self.submit_login().await;
        }
        let result = match self.current_page() {
            Ok(page) => page.save().await.map(Some),
            Err(e) => Err(e),
        };
        self.report(result)
    }

    pub fn cancel(&mut self) {
        if let Ok(page) = self.current_page() {
            page.close_dialog();
        }
    }

    pub async fn delete(&mut self, id: Id) -> bool {
        let result = match self.current_page() {
            Ok(page) => page.delete(id).await.map(Some),
            Err(e) => Err(e),
        };
        self.report(result)
    }

    /// Route a finished action through the 401 observer and the toasts
    fn report(&mut self, result: Result<Option<String>, PageError>) -> bool {
        let expired = self.process_events();
        match result {
            Ok(Some(message)) => {
                self.toasts.success(message);
                true
            }
            Ok(None) => true,
            Err(e) if e.is_unauthorized() && expired => false,
            Err(e) => {
                tracing::debug!("Action failed: {}", e);
                self.toasts.error(e.to_string());
                false
            }
        }
    }

    /// Apply one console command
    pub async fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Go(path) => {
                self.navigate(&path).await;
            }
            Command::Search(text) => {
                self.search(&text).await;
            }
            Command::Filter { name, value } => {
                self.filter(&name, &value).await;
            }
            Command::Add => {
                self.add();
            }
            Command::Edit(id) => {
                self.edit(id);
            }
            Command::Set { name, value } => {
                self.set(&name, &value);
            }
            Command::Save => {
                self.save().await;
            }
            Command::Cancel => self.cancel(),
            Command::Delete(id) => {
                self.delete(id).await;
            }
            Command::Login { email, password } => {
                self.route = Route::Login;
                self.login(&email, &password).await;
            }
            Command::Logout => self.logout(),
            Command::Show | Command::Help => {}
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    // ============================================
    // Rendering
    // ============================================

    pub fn top_bar(&self) -> String {
        let mut bar = APP_TITLE.to_string();
        if let Some(user) = self.auth.user() {
            bar.push_str(&format!("  |  {} ({})", user.nombre, user.rol));
        }
        if self.route != Route::Login {
            let nav: Vec<String> = Route::NAV
                .iter()
                .map(|r| {
                    if *r == self.route {
                        format!("[{}]", r.label())
                    } else {
                        r.label().to_string()
                    }
                })
                .collect();
            bar.push_str(&format!("\n{}", nav.join("  ")));
        }
        bar
    }

    /// The current screen as text
    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n\n", self.top_bar(), "=".repeat(60));

        match &self.route {
            Route::Login => out.push_str(&self.login.form().to_string()),
            Route::Dashboard => out.push_str(&self.dashboard.render()),
            Route::NotFound(path) => {
                out.push_str(&format!("404 - Página no encontrada: {}\n", path));
            }
            route => {
                if let Some(page) = self.page(route) {
                    out.push_str(&render_page(page));
                }
            }
        }
        out
    }
}

fn render_page(page: &dyn ResourcePage) -> String {
    let mut out = format!("{}\n\n{}", page.title(), page.table());

    let controls = page.controls();
    let mut actions = Vec::new();
    if controls.create {
        actions.push("add");
    }
    if controls.edit {
        actions.push("edit <id>");
    }
    if controls.delete {
        actions.push("delete <id>");
    }
    if !page.filters().is_empty() {
        out.push_str(&format!("\nFiltros: {}\n", page.filters().join(", ")));
    }
    if !actions.is_empty() {
        out.push_str(&format!("Acciones: {}\n", actions.join(", ")));
    }

    if let Some(form) = page.form() {
        out.push('\n');
        out.push_str(&form.to_string());
    }
    out
}
