//! Platform API HTTP Client
//!
//! One shared `reqwest` client bound to the configured base URL. The bearer
//! token is read from the session store on every request; a 401 response is
//! announced on the client's event channel and returned as
//! [`ApiError::Unauthorized`].

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::error::{ApiError, ApiResult};
use super::ClientEvent;
use crate::config::ApiConfig;
use crate::session::SessionStore;

/// Capacity of the client event channel
const EVENT_CAPACITY: usize = 16;

/// HTTP client for the events platform API
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<ClientEvent>,
}

impl ApiClient {
    /// Create a client for the given API configuration
    pub fn new(config: &ApiConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("event-manager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            http,
            base_url: config.normalized_base_url(),
            store,
            events,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session store the bearer token is read from
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Subscribe to client events (e.g. session rejected by the backend)
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.store.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET path`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::GET, path);
        self.send(Method::GET, path, builder).await
    }

    /// `GET path?query`
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        self.send(Method::GET, path, builder).await
    }

    /// `POST path` with a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    /// `PUT path` with a JSON body
    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, builder).await
    }

    /// `DELETE path`
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, builder).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, path, "Request failed: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "API response");

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "Session rejected by the API");
            // No subscribers just means nobody is watching the session.
            let _ = self.events.send(ClientEvent::Unauthenticated);
            return Err(ApiError::Unauthorized {
                detail: super::error::extract_detail(&body),
            });
        }

        if !status.is_success() {
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        decode_body(&body)
    }
}

/// Decode a JSON body; an empty body decodes as `null`
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Rol, User};
    use crate::session::MemorySessionStore;
    use crate::test_support::StubBackend;

    fn admin() -> User {
        User {
            id: 1,
            nombre: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            rol: Rol::Administrador,
        }
    }

    #[test]
    fn test_decode_empty_body() {
        let value: serde_json::Value = decode_body("").unwrap();
        assert!(value.is_null());

        let err = decode_body::<Vec<Category>>("{").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_base_url_normalized() {
        let store = Arc::new(MemorySessionStore::new());
        let client = ApiClient::new(&ApiConfig::new("http://api.local/"), store).unwrap();
        assert_eq!(client.base_url(), "http://api.local");
        assert_eq!(client.url("/eventos"), "http://api.local/eventos");
    }

    #[tokio::test]
    async fn test_attaches_bearer_token_at_call_time() {
        let backend = StubBackend::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let client = ApiClient::new(&backend.api_config(), store.clone()).unwrap();

        // No token yet: the stub rejects the call.
        let err = client.get::<Vec<Category>>("/categorias").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(backend.last_authorization(), None);

        store.save(StubBackend::ADMIN_TOKEN, &admin()).unwrap();
        let categories: Vec<Category> = client.get("/categorias").await.unwrap();
        assert!(!categories.is_empty());
        assert_eq!(
            backend.last_authorization().as_deref(),
            Some("Bearer admin-token")
        );
    }

    #[tokio::test]
    async fn test_unauthorized_emits_event() {
        let backend = StubBackend::start().await;
        let store = Arc::new(MemorySessionStore::with_session("expired", admin()));
        let client = ApiClient::new(&backend.api_config(), store.clone()).unwrap();
        let mut events = client.subscribe();

        let err = client.get::<Vec<User>>("/usuarios").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(events.try_recv().unwrap(), ClientEvent::Unauthenticated);

        // The transport itself leaves the store alone.
        assert_eq!(store.token().as_deref(), Some("expired"));
    }

    #[tokio::test]
    async fn test_other_errors_pass_through() {
        let backend = StubBackend::start().await;
        let store = Arc::new(MemorySessionStore::with_session(
            StubBackend::ADMIN_TOKEN,
            admin(),
        ));
        let client = ApiClient::new(&backend.api_config(), store).unwrap();
        let mut events = client.subscribe();

        let err = client.get::<Category>("/categorias/999").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.detail(), Some("Categoría no encontrada"));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_network_failure() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = Arc::new(MemorySessionStore::new());
        let client = ApiClient::new(&ApiConfig::new(format!("http://{}", addr)), store).unwrap();

        let err = client.get::<Vec<Category>>("/categorias").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
