//! Authentication service

use crate::client::{ApiClient, ApiResult};
use crate::models::{LoginCredentials, LoginResponse};

/// `POST /auth/login`
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token and the user record
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<LoginResponse> {
        self.client.post("/auth/login", credentials).await
    }
}
