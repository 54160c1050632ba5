//! Console Pages
//!
//! One controller per screen. A controller owns the rows it fetched, its
//! search and filter inputs and, for resource pages, a create/edit dialog.
//! Controllers never render directly: they expose a [`Table`] and an
//! optional [`FormView`] that the shell turns into text.
//!
//! - **login**: credential form
//! - **dashboard**: platform statistics
//! - **usuarios**, **eventos**, **categorias**, **inscripciones**: resource CRUD

mod categorias;
mod dashboard;
mod eventos;
mod inscripciones;
mod login;
mod usuarios;

pub use categorias::CategoriasPage;
pub use dashboard::{DashboardPage, DashboardView};
pub use eventos::{EventView, EventosPage};
pub use inscripciones::{has_capacity, EnrollmentView, InscripcionesPage, SIN_CUPOS};
pub use login::{LoginPage, LOGIN_FAILED, LOGIN_SUCCESS, REQUIRED_FIELD};
pub use usuarios::{UsuariosPage, PASSWORD_REQUIRED};

use async_trait::async_trait;
use thiserror::Error;

use crate::client::ApiError;
use crate::models::Id;
use crate::shell::render::{FormView, Table};

// ============================================
// Errors
// ============================================

/// Errors raised by page actions
#[derive(Debug, Error)]
pub enum PageError {
    /// A fetch failed; rows on screen are left untouched
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A mutation was rejected; `message` is what the page shows
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },

    /// Local pre-validation blocked the call
    #[error("{0}")]
    Validation(String),

    /// The current role may not perform the action
    #[error("{0}")]
    Forbidden(String),

    #[error("Campo desconocido: {0}")]
    UnknownField(String),

    #[error("Registro no encontrado: {0}")]
    NotFound(Id),

    #[error("No hay un formulario abierto")]
    NoDialog,
}

impl PageError {
    /// Wrap a rejected mutation, keeping the backend detail when present
    pub fn rejected(source: ApiError, fallback: &str) -> Self {
        PageError::Rejected {
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            PageError::Api(e) | PageError::Rejected { source: e, .. } => e.is_unauthorized(),
            _ => false,
        }
    }
}

// ============================================
// Dialog
// ============================================

/// Which call a save dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Create,
    Update(Id),
}

/// Create/edit dialog state
#[derive(Debug, Clone, Default)]
pub struct Dialog<F> {
    open: bool,
    form: F,
    edit_id: Option<Id>,
    error: Option<String>,
}

impl<F: Default> Dialog<F> {
    /// Open in create mode with the page's initial values
    pub fn open_create(&mut self, initial: F) {
        self.form = initial;
        self.edit_id = None;
        self.error = None;
        self.open = true;
    }

    /// Open in edit mode pre-filled from a record
    pub fn open_edit(&mut self, id: Id, form: F) {
        self.form = form;
        self.edit_id = Some(id);
        self.error = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.form = F::default();
        self.edit_id = None;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Form being edited; fails when the dialog is closed
    pub fn form_mut(&mut self) -> Result<&mut F, PageError> {
        if self.open {
            Ok(&mut self.form)
        } else {
            Err(PageError::NoDialog)
        }
    }

    pub fn edit_id(&self) -> Option<Id> {
        self.edit_id
    }

    pub fn action(&self) -> Result<SaveAction, PageError> {
        if !self.open {
            return Err(PageError::NoDialog);
        }
        Ok(match self.edit_id {
            Some(id) => SaveAction::Update(id),
            None => SaveAction::Create,
        })
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Dialog title for the current mode
    pub fn title(&self, create: &str, edit: &str) -> String {
        if self.edit_id.is_some() {
            edit.to_string()
        } else {
            create.to_string()
        }
    }
}

// ============================================
// Resource pages
// ============================================

/// Controls a page offers to the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Controls {
    pub const ALL: Controls = Controls {
        create: true,
        edit: true,
        delete: true,
    };

    pub const READ_ONLY: Controls = Controls {
        create: false,
        edit: false,
        delete: false,
    };
}

/// Shared surface of the CRUD pages
#[async_trait]
pub trait ResourcePage: Send {
    fn title(&self) -> &'static str;

    /// Fetch rows (and lookup data) from the backend
    async fn load(&mut self) -> Result<(), PageError>;

    /// Change the search text and refetch
    async fn set_search(&mut self, text: &str) -> Result<(), PageError>;

    /// Change a named filter and refetch; an empty value clears it
    async fn set_filter(&mut self, name: &str, value: &str) -> Result<(), PageError>;

    /// Names of the filters `set_filter` accepts
    fn filters(&self) -> &'static [&'static str];

    fn controls(&self) -> Controls {
        Controls::ALL
    }

    fn open_create(&mut self) -> Result<(), PageError>;

    fn open_edit(&mut self, id: Id) -> Result<(), PageError>;

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), PageError>;

    /// Create or update from the open dialog, then refetch and close
    async fn save(&mut self) -> Result<String, PageError>;

    /// Delete immediately and refetch
    async fn delete(&mut self, id: Id) -> Result<String, PageError>;

    fn close_dialog(&mut self);

    /// Rows currently shown
    fn table(&self) -> Table;

    /// Rows currently shown, as JSON
    fn rows_json(&self) -> serde_json::Value;

    /// The open dialog, if any
    fn form(&self) -> Option<FormView>;
}

// ============================================
// Field parsing
// ============================================

/// Parse an optional numeric id; blank means unset
pub(crate) fn parse_optional_id(name: &str, value: &str) -> Result<Option<Id>, PageError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| {
            PageError::Validation(format!("{}: identificador inválido '{}'", name, value))
        })
}

/// Check a date field; blank is allowed
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339.
pub(crate) fn parse_date(name: &str, value: &str) -> Result<String, PageError> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    let value = value.trim();
    let valid = value.is_empty()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok();

    if valid {
        Ok(value.to_string())
    } else {
        Err(PageError::Validation(format!(
            "{}: fecha inválida '{}' (use AAAA-MM-DD)",
            name, value
        )))
    }
}
