//! Users service

use crate::client::{ApiClient, ApiResult};
use crate::models::{Id, ListParams, Rol, User, UserCount, UserInput, UserUpdate};

/// `/usuarios` endpoints
#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET /usuarios
    pub async fn list(&self, params: &ListParams) -> ApiResult<Vec<User>> {
        self.client.get_with_query("/usuarios", params).await
    }

    /// GET /usuarios/buscar?email=
    pub async fn search(&self, email: &str) -> ApiResult<Vec<User>> {
        self.client
            .get_with_query("/usuarios/buscar", &[("email", email)])
            .await
    }

    /// GET /usuarios/:id
    pub async fn get(&self, id: Id) -> ApiResult<User> {
        self.client.get(&format!("/usuarios/{}", id)).await
    }

    /// POST /usuarios
    pub async fn create(&self, input: &UserInput) -> ApiResult<User> {
        self.client.post("/usuarios", input).await
    }

    /// PUT /usuarios/:id
    pub async fn update(&self, id: Id, input: &UserUpdate) -> ApiResult<User> {
        self.client.put(&format!("/usuarios/{}", id), input).await
    }

    /// DELETE /usuarios/:id
    pub async fn delete(&self, id: Id) -> ApiResult<serde_json::Value> {
        self.client.delete(&format!("/usuarios/{}", id)).await
    }

    /// GET /usuarios/rol/:rol
    pub async fn by_role(&self, rol: Rol) -> ApiResult<Vec<User>> {
        self.client
            .get(&format!("/usuarios/rol/{}", urlencoding::encode(rol.as_str())))
            .await
    }

    /// GET /usuarios/stats/count
    pub async fn count(&self) -> ApiResult<UserCount> {
        self.client.get("/usuarios/stats/count").await
    }
}
