//! Inscripciones page
//!
//! Administrators see every enrollment and may enroll anyone; a Cliente
//! only sees and creates their own. Before creating, the page checks the
//! target event still has room, counting every enrollment the backend
//! returned whatever view is shown.

use async_trait::async_trait;

use super::{parse_date, parse_optional_id, Dialog, PageError, ResourcePage, SaveAction};
use crate::filter::RowFilter;
use crate::models::{Enrollment, EnrollmentInput, Event, Id, ListParams, User};
use crate::services::Api;
use crate::session::AuthContext;
use crate::shell::render::{FieldKind, FieldView, FormView, Table};

pub const SIN_CUPOS: &str = "No hay cupos disponibles para este evento.";
const SAVE_FAILED: &str = "Error al guardar la inscripción.";
const NO_SCOPE: &str = "Seleccione un usuario para esta vista.";

/// Whether `event` can take one more enrollment given `enrollments`
pub fn has_capacity(event: &Event, enrollments: &[Enrollment]) -> bool {
    let taken = enrollments
        .iter()
        .filter(|i| i.evento_id == event.id)
        .count();
    taken < event.cupos as usize
}

/// Which enrollments the page lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnrollmentView {
    #[default]
    Todas,
    /// Enrollments of one user in events still running
    Activas,
    /// Enrollments of one user in finished events
    Historial,
}

impl std::str::FromStr for EnrollmentView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "todas" => Ok(EnrollmentView::Todas),
            "activas" => Ok(EnrollmentView::Activas),
            "historial" => Ok(EnrollmentView::Historial),
            other => Err(format!("Vista desconocida: {}", other)),
        }
    }
}

pub struct InscripcionesPage {
    api: Api,
    auth: AuthContext,
    /// Full enrollment list; the capacity count runs over it
    fetched: Vec<Enrollment>,
    rows: Vec<Enrollment>,
    users: Vec<User>,
    events: Vec<Event>,
    search: String,
    usuario: Option<Id>,
    view: EnrollmentView,
    dialog: Dialog<EnrollmentInput>,
}

impl InscripcionesPage {
    pub fn new(api: Api, auth: AuthContext) -> Self {
        Self {
            api,
            auth,
            fetched: Vec::new(),
            rows: Vec::new(),
            users: Vec::new(),
            events: Vec::new(),
            search: String::new(),
            usuario: None,
            view: EnrollmentView::default(),
            dialog: Dialog::default(),
        }
    }

    pub fn rows(&self) -> &[Enrollment] {
        &self.rows
    }

    /// Users offered by the form and the user filter
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Events open for enrollment
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn dialog(&self) -> &Dialog<EnrollmentInput> {
        &self.dialog
    }

    fn is_admin(&self) -> bool {
        self.auth.is_admin()
    }

    /// The current user when it is a Cliente
    fn own_id(&self) -> Option<Id> {
        self.auth.user().filter(|u| !u.is_admin()).map(|u| u.id)
    }

    fn user_name(&self, id: Id) -> String {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.nombre.clone())
            .unwrap_or_default()
    }

    fn event_name(&self, id: Id) -> String {
        self.events
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.nombre.clone())
            .unwrap_or_default()
    }

    fn narrow(&self, enrollments: &[Enrollment]) -> Vec<Enrollment> {
        RowFilter::new()
            .equal(self.own_id(), |i: &Enrollment| i.usuario_id)
            .equal(self.usuario, |i: &Enrollment| i.usuario_id)
            .matching(&self.search, |i: &Enrollment| {
                vec![self.user_name(i.usuario_id), self.event_name(i.evento_id)]
            })
            .apply(enrollments)
    }

    /// User whose active/history enrollments are listed
    fn scoped_user(&self) -> Result<Id, PageError> {
        self.own_id()
            .or(self.usuario)
            .ok_or_else(|| PageError::Validation(NO_SCOPE.to_string()))
    }

    /// Reject a view/user combination before it is stored
    fn check_scope(&self, view: EnrollmentView, usuario: Option<Id>) -> Result<(), PageError> {
        if view != EnrollmentView::Todas && self.own_id().or(usuario).is_none() {
            return Err(PageError::Validation(NO_SCOPE.to_string()));
        }
        Ok(())
    }

    /// Block a create when the target event is already full
    fn check_capacity(&self, input: &EnrollmentInput) -> Result<(), PageError> {
        let event = input
            .evento_id
            .and_then(|id| self.events.iter().find(|e| e.id == id));

        match event {
            Some(event) if !has_capacity(event, &self.fetched) => {
                tracing::info!(
                    evento_id = event.id,
                    cupos = event.cupos,
                    "Enrollment blocked, event full"
                );
                Err(PageError::Validation(SIN_CUPOS.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ResourcePage for InscripcionesPage {
    fn title(&self) -> &'static str {
        "Inscripciones"
    }

    async fn load(&mut self) -> Result<(), PageError> {
        let users = match self.auth.user() {
            Some(user) if !user.is_admin() => vec![user],
            _ => self.api.users.list(&ListParams::default()).await?,
        };
        let events = self.api.events.available().await?;
        let all = self.api.enrollments.list().await?;
        let scoped = match self.view {
            EnrollmentView::Todas => None,
            EnrollmentView::Activas => {
                Some(self.api.enrollments.active(self.scoped_user()?).await?)
            }
            EnrollmentView::Historial => {
                Some(self.api.enrollments.history(self.scoped_user()?).await?)
            }
        };
        let listed = scoped.as_deref().unwrap_or(all.as_slice());

        tracing::debug!(
            enrollments = all.len(),
            listed = listed.len(),
            events = events.len(),
            view = ?self.view,
            "Enrollments loaded"
        );
        self.users = users;
        self.events = events;
        self.rows = self.narrow(listed);
        self.fetched = all;
        Ok(())
    }

    async fn set_search(&mut self, text: &str) -> Result<(), PageError> {
        self.search = text.to_string();
        self.load().await
    }

    async fn set_filter(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        match name {
            "usuario" => {
                let usuario = parse_optional_id(name, value)?;
                self.check_scope(self.view, usuario)?;
                self.usuario = usuario;
            }
            "vista" => {
                let view = value.parse().map_err(PageError::Validation)?;
                self.check_scope(view, self.usuario)?;
                self.view = view;
            }
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        self.load().await
    }

    fn filters(&self) -> &'static [&'static str] {
        &["usuario", "vista"]
    }

    fn open_create(&mut self) -> Result<(), PageError> {
        let initial = EnrollmentInput {
            usuario_id: self.own_id(),
            ..Default::default()
        };
        self.dialog.open_create(initial);
        Ok(())
    }

    fn open_edit(&mut self, id: Id) -> Result<(), PageError> {
        let enrollment = self
            .rows
            .iter()
            .find(|i| i.id == id)
            .ok_or(PageError::NotFound(id))?;
        let form = EnrollmentInput {
            usuario_id: Some(enrollment.usuario_id),
            evento_id: Some(enrollment.evento_id),
            fecha_inscripcion: enrollment.fecha_inscripcion.clone(),
        };
        self.dialog.open_edit(id, form);
        Ok(())
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        if name == "usuario_id" && !self.is_admin() {
            return Err(PageError::Forbidden(
                "Solo puede inscribirse a sí mismo.".to_string(),
            ));
        }

        let form = self.dialog.form_mut()?;
        match name {
            "usuario_id" => form.usuario_id = parse_optional_id(name, value)?,
            "evento_id" => form.evento_id = parse_optional_id(name, value)?,
            "fecha_inscripcion" => form.fecha_inscripcion = parse_date(name, value)?,
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    async fn save(&mut self) -> Result<String, PageError> {
        self.dialog.clear_error();
        let mut input = self.dialog.form().clone();
        if let Some(own) = self.own_id() {
            input.usuario_id = Some(own);
        }

        let result = match self.dialog.action()? {
            SaveAction::Update(id) => self
                .api
                .enrollments
                .update(id, &input)
                .await
                .map(|_| "Inscripción actualizada"),
            SaveAction::Create => {
                if let Err(e) = self.check_capacity(&input) {
                    self.dialog.set_error(e.to_string());
                    return Err(e);
                }
                if input.fecha_inscripcion.is_empty() {
                    input.fecha_inscripcion = chrono::Local::now().format("%Y-%m-%d").to_string();
                }
                self.api
                    .enrollments
                    .create(&input)
                    .await
                    .map(|_| "Inscripción creada")
            }
        };

        let message = match result {
            Ok(message) => message,
            Err(e) => {
                let err = PageError::rejected(e, SAVE_FAILED);
                self.dialog.set_error(err.to_string());
                return Err(err);
            }
        };

        self.dialog.close();
        self.load().await?;
        Ok(message.to_string())
    }

    async fn delete(&mut self, id: Id) -> Result<String, PageError> {
        self.api
            .enrollments
            .delete(id)
            .await
            .map_err(|e| PageError::rejected(e, "Error al eliminar la inscripción."))?;
        self.load().await?;
        Ok("Inscripción eliminada".to_string())
    }

    fn close_dialog(&mut self) {
        self.dialog.close();
    }

    fn table(&self) -> Table {
        let mut table = Table::new(vec!["ID", "Usuario", "Evento", "Fecha de inscripción"]);
        for enrollment in &self.rows {
            table.push(vec![
                enrollment.id.to_string(),
                self.user_name(enrollment.usuario_id),
                self.event_name(enrollment.evento_id),
                enrollment.fecha_inscripcion.clone(),
            ]);
        }
        table
    }

    fn rows_json(&self) -> serde_json::Value {
        serde_json::json!(self.rows)
    }

    fn form(&self) -> Option<FormView> {
        if !self.dialog.is_open() {
            return None;
        }
        let form = self.dialog.form();

        let usuario = match self.auth.user() {
            Some(user) if !user.is_admin() => {
                FieldView::text("usuario_id", "Usuario", user.id.to_string())
                    .with_kind(FieldKind::Select(vec![(user.id.to_string(), user.nombre)]))
                    .disabled()
            }
            _ => FieldView::text(
                "usuario_id",
                "Usuario",
                form.usuario_id.map(|id| id.to_string()).unwrap_or_default(),
            )
            .with_kind(FieldKind::Select(
                self.users
                    .iter()
                    .map(|u| (u.id.to_string(), u.nombre.clone()))
                    .collect(),
            )),
        };

        let evento = FieldView::text(
            "evento_id",
            "Evento",
            form.evento_id.map(|id| id.to_string()).unwrap_or_default(),
        )
        .with_kind(FieldKind::Select(
            self.events
                .iter()
                .map(|e| (e.id.to_string(), e.nombre.clone()))
                .collect(),
        ));

        Some(FormView {
            title: self
                .dialog
                .title("Agregar Inscripción", "Editar Inscripción"),
            fields: vec![
                usuario,
                evento,
                FieldView::text(
                    "fecha_inscripcion",
                    "Fecha de inscripción",
                    &form.fecha_inscripcion,
                )
                .with_kind(FieldKind::Date),
            ],
            error: self.dialog.error().map(str::to_string),
        })
    }
}
