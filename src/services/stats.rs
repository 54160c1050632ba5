//! Dashboard statistics service

use crate::client::{ApiClient, ApiResult};
use crate::models::DashboardStats;

/// `GET /stats/dashboard`
#[derive(Clone)]
pub struct StatsService {
    client: ApiClient,
}

impl StatsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> ApiResult<DashboardStats> {
        self.client.get("/stats/dashboard").await
    }
}
