//! Eventos page

use async_trait::async_trait;

use super::{parse_date, parse_optional_id, Dialog, PageError, ResourcePage, SaveAction};
use crate::filter::RowFilter;
use crate::models::{Category, Event, EventInput, Id};
use crate::services::Api;
use crate::shell::render::{FieldKind, FieldView, FormView, Table};

/// Which events the page lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventView {
    #[default]
    Todos,
    /// Only events open for enrollment
    Disponibles,
}

impl std::str::FromStr for EventView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "todos" => Ok(EventView::Todos),
            "disponibles" => Ok(EventView::Disponibles),
            other => Err(format!("Vista desconocida: {}", other)),
        }
    }
}

fn form_from(event: &Event) -> EventInput {
    EventInput {
        nombre: event.nombre.clone(),
        descripcion: event.descripcion.clone(),
        fecha_inicio: event.fecha_inicio.clone(),
        fecha_fin: event.fecha_fin.clone(),
        lugar: event.lugar.clone(),
        cupos: event.cupos,
        categoria_id: event.categoria_id,
    }
}

pub struct EventosPage {
    api: Api,
    rows: Vec<Event>,
    categories: Vec<Category>,
    search: String,
    categoria: Option<Id>,
    view: EventView,
    dialog: Dialog<EventInput>,
}

impl EventosPage {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            rows: Vec::new(),
            categories: Vec::new(),
            search: String::new(),
            categoria: None,
            view: EventView::default(),
            dialog: Dialog::default(),
        }
    }

    /// Rows shown after the last successful fetch
    pub fn rows(&self) -> &[Event] {
        &self.rows
    }

    fn narrow(&self, events: &[Event]) -> Vec<Event> {
        RowFilter::new()
            .equal(self.categoria.map(Some), |e: &Event| e.categoria_id)
            .matching(&self.search, |e: &Event| {
                vec![e.nombre.clone(), e.descripcion.clone()]
            })
            .apply(events)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn dialog(&self) -> &Dialog<EventInput> {
        &self.dialog
    }

    fn category_options(&self) -> FieldKind {
        let mut options = vec![(String::new(), "Sin categoría".to_string())];
        options.extend(
            self.categories
                .iter()
                .map(|c| (c.id.to_string(), c.nombre.clone())),
        );
        FieldKind::Select(options)
    }
}

#[async_trait]
impl ResourcePage for EventosPage {
    fn title(&self) -> &'static str {
        "Eventos"
    }

    async fn load(&mut self) -> Result<(), PageError> {
        let events = match self.view {
            EventView::Todos => self.api.events.all().await?,
            EventView::Disponibles => self.api.events.available().await?,
        };
        let categories = self.api.categories.list().await?;

        tracing::debug!(
            events = events.len(),
            categories = categories.len(),
            view = ?self.view,
            "Events loaded"
        );
        self.rows = self.narrow(&events);
        self.categories = categories;
        Ok(())
    }

    async fn set_search(&mut self, text: &str) -> Result<(), PageError> {
        self.search = text.to_string();
        self.load().await
    }

    async fn set_filter(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        match name {
            "categoria" => self.categoria = parse_optional_id(name, value)?,
            "vista" => self.view = value.parse().map_err(PageError::Validation)?,
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        self.load().await
    }

    fn filters(&self) -> &'static [&'static str] {
        &["categoria", "vista"]
    }

    fn open_create(&mut self) -> Result<(), PageError> {
        self.dialog.open_create(EventInput::default());
        Ok(())
    }

    fn open_edit(&mut self, id: Id) -> Result<(), PageError> {
        let event = self
            .rows
            .iter()
            .find(|e| e.id == id)
            .ok_or(PageError::NotFound(id))?;
        self.dialog.open_edit(id, form_from(event));
        Ok(())
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        let form = self.dialog.form_mut()?;
        match name {
            "nombre" => form.nombre = value.to_string(),
            "descripcion" => form.descripcion = value.to_string(),
            "fecha_inicio" => form.fecha_inicio = parse_date(name, value)?,
            "fecha_fin" => form.fecha_fin = parse_date(name, value)?,
            "lugar" => form.lugar = value.to_string(),
            "cupos" => {
                form.cupos = value.trim().parse().map_err(|_| {
                    PageError::Validation(format!("cupos: número inválido '{}'", value))
                })?
            }
            "categoria_id" => form.categoria_id = parse_optional_id(name, value)?,
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    async fn save(&mut self) -> Result<String, PageError> {
        let input = self.dialog.form().clone();

        let result = match self.dialog.action()? {
            SaveAction::Update(id) => self
                .api
                .events
                .update(id, &input)
                .await
                .map(|_| "Evento actualizado"),
            SaveAction::Create => self
                .api
                .events
                .create(&input)
                .await
                .map(|_| "Evento creado"),
        };

        let message = match result {
            Ok(message) => message,
            Err(e) => {
                let err = PageError::rejected(e, "Error al guardar el evento.");
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
            .events
            .delete(id)
            .await
            .map_err(|e| PageError::rejected(e, "Error al eliminar el evento."))?;
        self.load().await?;
        Ok("Evento eliminado".to_string())
    }

    fn close_dialog(&mut self) {
        self.dialog.close();
    }

    fn table(&self) -> Table {
        let mut table = Table::new(vec![
            "ID",
            "Nombre",
            "Descripción",
            "Fecha Inicio",
            "Fecha Fin",
            "Lugar",
            "Cupos",
            "Categoría",
        ]);
        for event in &self.rows {
            table.push(vec![
                event.id.to_string(),
                event.nombre.clone(),
                event.descripcion.clone(),
                event.fecha_inicio.clone(),
                event.fecha_fin.clone(),
                event.lugar.clone(),
                event.cupos.to_string(),
                event.category_name().to_string(),
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
            title: self.dialog.title("Agregar Evento", "Editar Evento"),
            fields: vec![
                FieldView::text("nombre", "Nombre", &form.nombre),
                FieldView::text("descripcion", "Descripción", &form.descripcion),
                FieldView::text("fecha_inicio", "Fecha Inicio", &form.fecha_inicio)
                    .with_kind(FieldKind::Date),
                FieldView::text("fecha_fin", "Fecha Fin", &form.fecha_fin)
                    .with_kind(FieldKind::Date),
                FieldView::text("lugar", "Lugar", &form.lugar),
                FieldView::text("cupos", "Cupos", form.cupos.to_string())
                    .with_kind(FieldKind::Number),
                FieldView::text(
                    "categoria_id",
                    "Categoría",
                    form.categoria_id.map(|id| id.to_string()).unwrap_or_default(),
                )
                .with_kind(self.category_options()),
            ],
            error: self.dialog.error().map(str::to_string),
        })
    }
}
