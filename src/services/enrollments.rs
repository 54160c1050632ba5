//! Enrollments service

use crate::client::{ApiClient, ApiResult};
use crate::models::{Enrollment, EnrollmentInput, Id};

/// `/inscripciones` endpoints
#[derive(Clone)]
pub struct EnrollmentService {
    client: ApiClient,
}

impl EnrollmentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Enrollment>> {
        self.client.get("/inscripciones").await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Enrollment> {
        self.client.get(&format!("/inscripciones/{}", id)).await
    }

    pub async fn create(&self, input: &EnrollmentInput) -> ApiResult<Enrollment> {
        self.client.post("/inscripciones", input).await
    }

    pub async fn update(&self, id: Id, input: &EnrollmentInput) -> ApiResult<Enrollment> {
        self.client
            .put(&format!("/inscripciones/{}", id), input)
            .await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<serde_json::Value> {
        self.client.delete(&format!("/inscripciones/{}", id)).await
    }

    /// GET /inscripciones/activas/:usuario_id
    ///
    /// Enrollments of a user in events that have not finished yet.
    pub async fn active(&self, usuario_id: Id) -> ApiResult<Vec<Enrollment>> {
        self.client
            .get(&format!("/inscripciones/activas/{}", usuario_id))
            .await
    }

    /// GET /inscripciones/historial/:usuario_id
    pub async fn history(&self, usuario_id: Id) -> ApiResult<Vec<Enrollment>> {
        self.client
            .get(&format!("/inscripciones/historial/{}", usuario_id))
            .await
    }
}
