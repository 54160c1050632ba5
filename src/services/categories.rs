//! Categories service

use crate::client::{ApiClient, ApiResult};
use crate::models::{Category, CategoryInput, Id};

/// `/categorias` endpoints
#[derive(Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        self.client.get("/categorias").await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Category> {
        self.client.get(&format!("/categorias/{}", id)).await
    }

    pub async fn create(&self, input: &CategoryInput) -> ApiResult<Category> {
        self.client.post("/categorias", input).await
    }

    pub async fn update(&self, id: Id, input: &CategoryInput) -> ApiResult<Category> {
        self.client.put(&format!("/categorias/{}", id), input).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<serde_json::Value> {
        self.client.delete(&format!("/categorias/{}", id)).await
    }
}
