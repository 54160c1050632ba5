//! Categorías page
//!
//! Readable by everyone; create, edit and delete are reserved to
//! administrators.

use async_trait::async_trait;

use super::{Controls, Dialog, PageError, ResourcePage, SaveAction};
use crate::filter::RowFilter;
use crate::models::{Category, CategoryInput, Id};
use crate::services::Api;
use crate::session::AuthContext;
use crate::shell::render::{FieldView, FormView, Table};

const ADMIN_ONLY: &str = "Solo los administradores pueden gestionar categorías.";

pub struct CategoriasPage {
    api: Api,
    auth: AuthContext,
    rows: Vec<Category>,
    search: String,
    dialog: Dialog<CategoryInput>,
}

impl CategoriasPage {
    pub fn new(api: Api, auth: AuthContext) -> Self {
        Self {
            api,
            auth,
            rows: Vec::new(),
            search: String::new(),
            dialog: Dialog::default(),
        }
    }

    pub fn rows(&self) -> &[Category] {
        &self.rows
    }

    pub fn dialog(&self) -> &Dialog<CategoryInput> {
        &self.dialog
    }

    fn require_admin(&self) -> Result<(), PageError> {
        if self.auth.is_admin() {
            Ok(())
        } else {
            Err(PageError::Forbidden(ADMIN_ONLY.to_string()))
        }
    }
}

#[async_trait]
impl ResourcePage for CategoriasPage {
    fn title(&self) -> &'static str {
        "Categorías"
    }

    async fn load(&mut self) -> Result<(), PageError> {
        let categories = self.api.categories.list().await?;
        self.rows = RowFilter::new()
            .matching(&self.search, |c: &Category| vec![c.nombre.clone()])
            .apply(&categories);
        Ok(())
    }

    async fn set_search(&mut self, text: &str) -> Result<(), PageError> {
        self.search = text.to_string();
        self.load().await
    }

    async fn set_filter(&mut self, name: &str, _value: &str) -> Result<(), PageError> {
        Err(PageError::UnknownField(name.to_string()))
    }

    fn filters(&self) -> &'static [&'static str] {
        &[]
    }

    fn controls(&self) -> Controls {
        if self.auth.is_admin() {
            Controls::ALL
        } else {
            Controls::READ_ONLY
        }
    }

    fn open_create(&mut self) -> Result<(), PageError> {
        self.require_admin()?;
        self.dialog.open_create(CategoryInput::default());
        Ok(())
    }

    fn open_edit(&mut self, id: Id) -> Result<(), PageError> {
        self.require_admin()?;
        let category = self
            .rows
            .iter()
            .find(|c| c.id == id)
            .ok_or(PageError::NotFound(id))?;
        let form = CategoryInput {
            nombre: category.nombre.clone(),
            descripcion: category.descripcion.clone().unwrap_or_default(),
        };
        self.dialog.open_edit(id, form);
        Ok(())
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        let form = self.dialog.form_mut()?;
        match name {
            "nombre" => form.nombre = value.to_string(),
            "descripcion" => form.descripcion = value.to_string(),
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    async fn save(&mut self) -> Result<String, PageError> {
        self.require_admin()?;
        let input = self.dialog.form().clone();

        let result = match self.dialog.action()? {
            SaveAction::Update(id) => self
                .api
                .categories
                .update(id, &input)
                .await
                .map(|_| "Categoría actualizada"),
            SaveAction::Create => self
                .api
                .categories
                .create(&input)
                .await
                .map(|_| "Categoría creada"),
        };

        let message = match result {
            Ok(message) => message,
            Err(e) => {
                let err = PageError::rejected(e, "Error al guardar la categoría.");
                self.dialog.set_error(err.to_string());
                return Err(err);
            }
        };

        self.dialog.close();
        self.load().await?;
        Ok(message.to_string())
    }

    async fn delete(&mut self, id: Id) -> Result<String, PageError> {
        self.require_admin()?;
        self.api
            .categories
            .delete(id)
            .await
            .map_err(|e| PageError::rejected(e, "Error al eliminar la categoría."))?;
        self.load().await?;
        Ok("Categoría eliminada".to_string())
    }

    fn close_dialog(&mut self) {
        self.dialog.close();
    }

    fn table(&self) -> Table {
        let mut table = Table::new(vec!["ID", "Nombre", "Descripción"]);
        for category in &self.rows {
            table.push(vec![
                category.id.to_string(),
                category.nombre.clone(),
                category.descripcion.clone().unwrap_or_default(),
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

        Some(FormView {
            title: self.dialog.title("Agregar Categoría", "Editar Categoría"),
            fields: vec![
                FieldView::text("nombre", "Nombre", &form.nombre),
                FieldView::text("descripcion", "Descripción", &form.descripcion),
            ],
            error: self.dialog.error().map(str::to_string),
        })
    }
}
