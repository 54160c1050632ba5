//! Usuarios page

use async_trait::async_trait;

use super::{Dialog, PageError, ResourcePage, SaveAction};
use crate::filter::RowFilter;
use crate::models::{Id, ListParams, Rol, User, UserInput, UserUpdate};
use crate::services::Api;
use crate::shell::render::{FieldKind, FieldView, FormView, Table};

pub const PASSWORD_REQUIRED: &str = "La contraseña es obligatoria para crear un usuario.";

/// Dialog form; the password is only sent on creation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
    pub password: String,
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            nombre: user.nombre.clone(),
            email: user.email.clone(),
            rol: user.rol,
            password: String::new(),
        }
    }
}

pub struct UsuariosPage {
    api: Api,
    rows: Vec<User>,
    search: String,
    rol: Option<Rol>,
    dialog: Dialog<UserForm>,
}

impl UsuariosPage {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            rows: Vec::new(),
            search: String::new(),
            rol: None,
            dialog: Dialog::default(),
        }
    }

    /// Rows shown after the last successful fetch
    pub fn rows(&self) -> &[User] {
        &self.rows
    }

    /// Narrow fetched users by the search text and role filter
    fn narrow(&self, users: &[User]) -> Vec<User> {
        RowFilter::new()
            .matching(&self.search, |u: &User| vec![u.email.clone()])
            .equal(self.rol, |u: &User| u.rol)
            .apply(users)
    }

    pub fn dialog(&self) -> &Dialog<UserForm> {
        &self.dialog
    }

    fn roles() -> FieldKind {
        FieldKind::Select(
            [Rol::Administrador, Rol::Cliente]
                .iter()
                .map(|r| (r.as_str().to_string(), r.as_str().to_string()))
                .collect(),
        )
    }
}

#[async_trait]
impl ResourcePage for UsuariosPage {
    fn title(&self) -> &'static str {
        "Usuarios"
    }

    /// Search text wins over the role filter, which wins over the plain list
    async fn load(&mut self) -> Result<(), PageError> {
        let search = self.search.trim();
        let users = if !search.is_empty() {
            self.api.users.search(search).await?
        } else if let Some(rol) = self.rol {
            self.api.users.by_role(rol).await?
        } else {
            self.api.users.list(&ListParams::default()).await?
        };

        tracing::debug!(count = users.len(), "Users loaded");
        self.rows = self.narrow(&users);
        Ok(())
    }

    async fn set_search(&mut self, text: &str) -> Result<(), PageError> {
        self.search = text.to_string();
        self.load().await
    }

    async fn set_filter(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        match name {
            "rol" => {
                self.rol = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(PageError::Validation)?)
                };
                self.load().await
            }
            other => Err(PageError::UnknownField(other.to_string())),
        }
    }

    fn filters(&self) -> &'static [&'static str] {
        &["rol"]
    }

    fn open_create(&mut self) -> Result<(), PageError> {
        self.dialog.open_create(UserForm::default());
        Ok(())
    }

    fn open_edit(&mut self, id: Id) -> Result<(), PageError> {
        let form = self
            .rows
            .iter()
            .find(|u| u.id == id)
            .map(UserForm::from)
            .ok_or(PageError::NotFound(id))?;
        self.dialog.open_edit(id, form);
        Ok(())
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        let form = self.dialog.form_mut()?;
        match name {
            "nombre" => form.nombre = value.to_string(),
            "email" => form.email = value.to_string(),
            "password" => form.password = value.to_string(),
            "rol" => form.rol = value.parse().map_err(PageError::Validation)?,
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    async fn save(&mut self) -> Result<String, PageError> {
        let form = self.dialog.form().clone();

        let result = match self.dialog.action()? {
            SaveAction::Update(id) => {
                let update = UserUpdate {
                    nombre: form.nombre,
                    email: form.email,
                    rol: form.rol,
                };
                self.api
                    .users
                    .update(id, &update)
                    .await
                    .map(|_| "Usuario actualizado")
            }
            SaveAction::Create => {
                if form.password.is_empty() {
                    self.dialog.set_error(PASSWORD_REQUIRED);
                    return Err(PageError::Validation(PASSWORD_REQUIRED.to_string()));
                }
                let input = UserInput {
                    nombre: form.nombre,
                    email: form.email,
                    rol: form.rol,
                    password: form.password,
                };
                self.api.users.create(&input).await.map(|_| "Usuario creado")
            }
        };

        let message = match result {
            Ok(message) => message,
            Err(e) => {
                let err = PageError::rejected(e, "Error al guardar el usuario.");
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
            .users
            .delete(id)
            .await
            .map_err(|e| PageError::rejected(e, "Error al eliminar el usuario."))?;
        self.load().await?;
        Ok("Usuario eliminado".to_string())
    }

    fn close_dialog(&mut self) {
        self.dialog.close();
    }

    fn table(&self) -> Table {
        let mut table = Table::new(vec!["ID", "Nombre", "Email", "Rol"]);
        for user in &self.rows {
            table.push(vec![
                user.id.to_string(),
                user.nombre.clone(),
                user.email.clone(),
                user.rol.to_string(),
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

        let mut fields = vec![
            FieldView::text("nombre", "Nombre", &form.nombre),
            FieldView::text("email", "Email", &form.email),
        ];
        if self.dialog.edit_id().is_none() {
            fields.push(
                FieldView::text("password", "Contraseña", &form.password)
                    .with_kind(FieldKind::Password),
            );
        }
        fields.push(FieldView::text("rol", "Rol", form.rol.as_str()).with_kind(Self::roles()));

        Some(FormView {
            title: self.dialog.title("Agregar Usuario", "Editar Usuario"),
            fields,
            error: self.dialog.error().map(str::to_string),
        })
    }
}
