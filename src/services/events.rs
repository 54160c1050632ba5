//! Events service

use serde::Serialize;

use crate::client::{ApiClient, ApiResult};
use crate::models::{Event, EventInput, Id};

/// Query parameters for `GET /eventos`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<Id>,
}

/// `/eventos` endpoints
#[derive(Clone)]
pub struct EventService {
    client: ApiClient,
}

impl EventService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET /eventos
    pub async fn list(&self, query: &EventQuery) -> ApiResult<Vec<Event>> {
        self.client.get_with_query("/eventos", query).await
    }

    /// GET /eventos/buscar?q=
    pub async fn search(&self, q: &str) -> ApiResult<Vec<Event>> {
        self.client
            .get_with_query("/eventos/buscar", &[("q", q)])
            .await
    }

    /// GET /eventos/:id
    pub async fn get(&self, id: Id) -> ApiResult<Event> {
        self.client.get(&format!("/eventos/{}", id)).await
    }

    /// POST /eventos
    pub async fn create(&self, input: &EventInput) -> ApiResult<Event> {
        self.client.post("/eventos", input).await
    }

    /// PUT /eventos/:id
    pub async fn update(&self, id: Id, input: &EventInput) -> ApiResult<Event> {
        self.client.put(&format!("/eventos/{}", id), input).await
    }

    /// DELETE /eventos/:id
    pub async fn delete(&self, id: Id) -> ApiResult<serde_json::Value> {
        self.client.delete(&format!("/eventos/{}", id)).await
    }

    /// GET /eventos/disponibles
    ///
    /// Events currently open for new enrollments.
    pub async fn available(&self) -> ApiResult<Vec<Event>> {
        self.client.get("/eventos/disponibles").await
    }

    /// GET /eventos/categoria/:id
    pub async fn by_category(&self, categoria_id: Id) -> ApiResult<Vec<Event>> {
        self.client
            .get(&format!("/eventos/categoria/{}", categoria_id))
            .await
    }

    /// GET /eventos/todos
    pub async fn all(&self) -> ApiResult<Vec<Event>> {
        self.client.get("/eventos/todos").await
    }
}
