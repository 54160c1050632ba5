//! In-process stub of the events platform API for tests
//!
//! Serves the endpoints the console consumes from an axum router bound to an
//! ephemeral port, records every request, and enforces bearer tokens, admin
//! rights on categories and event capacity the way the real backend does.
//!
//! Seed data:
//! - users: 1 Ana (Administrador), 2 Beto (Cliente), 3 Carla (Cliente)
//! - categories: 1 Música, 2 Tecnología
//! - events: 1 Festival de Rock (cupos 3, full), 2 Charla Rust (cupos 3, two
//!   enrollments), 3 Feria de Arte (cupos 5, closed, no category)
//! - enrollments: 1-3 on event 1, 4-5 on event 2, 6 (Beto) on event 3

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::models::{Category, Enrollment, Event, Id, Rol, User};
use crate::session::{MemorySessionStore, SessionStore};

type Shared = Arc<Mutex<StubState>>;

/// Password accepted for every seeded user
pub const PASSWORD: &str = "secret";

#[derive(Clone)]
struct CurrentUser(User);

struct StubState {
    users: Vec<User>,
    passwords: HashMap<Id, String>,
    categories: Vec<Category>,
    events: Vec<Event>,
    closed_events: HashSet<Id>,
    enrollments: Vec<Enrollment>,
    tokens: HashMap<String, Id>,
    next_id: Id,
    fail_stats: bool,
    requests: Vec<String>,
    bodies: Vec<(String, Value)>,
    last_authorization: Option<String>,
}

pub fn admin_user() -> User {
    User {
        id: 1,
        nombre: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        rol: Rol::Administrador,
    }
}

pub fn client_user() -> User {
    User {
        id: 2,
        nombre: "Beto".to_string(),
        email: "beto@example.com".to_string(),
        rol: Rol::Cliente,
    }
}

fn seed_event(
    id: Id,
    nombre: &str,
    descripcion: &str,
    cupos: u32,
    categoria: Option<&Category>,
) -> Event {
    Event {
        id,
        nombre: nombre.to_string(),
        descripcion: descripcion.to_string(),
        fecha_inicio: "2025-03-01".to_string(),
        fecha_fin: "2025-03-02".to_string(),
        lugar: "Centro".to_string(),
        cupos,
        categoria_id: categoria.map(|c| c.id),
        categoria: categoria.cloned(),
    }
}

fn seed_enrollment(id: Id, usuario_id: Id, evento_id: Id) -> Enrollment {
    Enrollment {
        id,
        usuario_id,
        evento_id,
        fecha_inscripcion: format!("2025-01-{:02}", 9 + id),
    }
}

impl StubState {
    fn seeded() -> Self {
        let users = vec![
            admin_user(),
            client_user(),
            User {
                id: 3,
                nombre: "Carla".to_string(),
                email: "carla@example.com".to_string(),
                rol: Rol::Cliente,
            },
        ];
        let passwords = users.iter().map(|u| (u.id, PASSWORD.to_string())).collect();

        let musica = Category {
            id: 1,
            nombre: "Música".to_string(),
            descripcion: Some("Conciertos y festivales".to_string()),
        };
        let tecnologia = Category {
            id: 2,
            nombre: "Tecnología".to_string(),
            descripcion: None,
        };

        let events = vec![
            seed_event(1, "Festival de Rock", "Bandas en vivo", 3, Some(&musica)),
            seed_event(2, "Charla Rust", "Programación de sistemas", 3, Some(&tecnologia)),
            seed_event(3, "Feria de Arte", "Exposición", 5, None),
        ];

        let enrollments = vec![
            seed_enrollment(1, 1, 1),
            seed_enrollment(2, 2, 1),
            seed_enrollment(3, 3, 1),
            seed_enrollment(4, 2, 2),
            seed_enrollment(5, 3, 2),
            seed_enrollment(6, 2, 3),
        ];

        let mut tokens = HashMap::new();
        tokens.insert(StubBackend::ADMIN_TOKEN.to_string(), 1);
        tokens.insert(StubBackend::CLIENT_TOKEN.to_string(), 2);

        Self {
            users,
            passwords,
            categories: vec![musica, tecnologia],
            events,
            closed_events: HashSet::from([3]),
            enrollments,
            tokens,
            next_id: 100,
            fail_stats: false,
            requests: Vec::new(),
            bodies: Vec::new(),
            last_authorization: None,
        }
    }

    fn allocate_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    fn record_body(&mut self, key: &str, body: &Value) {
        self.bodies.push((key.to_string(), body.clone()));
    }
}

/// Handle to a running stub backend
pub struct StubBackend {
    base_url: String,
    state: Shared,
}

impl StubBackend {
    pub const ADMIN_TOKEN: &'static str = "admin-token";
    pub const CLIENT_TOKEN: &'static str = "client-token";

    /// Bind to an ephemeral port and start serving
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState::seeded()));
        let router = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url.clone())
    }

    /// Client reading its token from `store`
    pub fn client_with(&self, store: Arc<dyn SessionStore>) -> ApiClient {
        ApiClient::new(&self.api_config(), store).unwrap()
    }

    /// Client logged in as the seeded administrator
    pub fn admin_client(&self) -> ApiClient {
        self.client_with(Arc::new(MemorySessionStore::with_session(
            Self::ADMIN_TOKEN,
            admin_user(),
        )))
    }

    /// Every request seen so far, as `METHOD /path[?query]`
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests whose path starts with `prefix`
    pub fn requests_matching(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| {
                r.split_once(' ')
                    .map(|(_, path)| path.starts_with(prefix))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Number of requests exactly equal to `METHOD /path`
    pub fn count(&self, request: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == request).count()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.lock().unwrap().last_authorization.clone()
    }

    /// Last JSON body received for `METHOD /path`
    pub fn last_body(&self, request: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .bodies
            .iter()
            .rev()
            .find(|(key, _)| key == request)
            .map(|(_, body)| body.clone())
    }

    /// Invalidate every issued token
    pub fn expire_tokens(&self) {
        self.state.lock().unwrap().tokens.clear();
    }

    pub fn fail_stats(&self, fail: bool) {
        self.state.lock().unwrap().fail_stats = fail;
    }
}

// ============================================
// Router
// ============================================

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/usuarios", get(list_users).post(create_user))
        .route("/usuarios/buscar", get(search_users))
        .route("/usuarios/rol/:rol", get(users_by_role))
        .route("/usuarios/stats/count", get(count_users))
        .route(
            "/usuarios/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/categorias", get(list_categories).post(create_category))
        .route(
            "/categorias/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/eventos", get(list_events).post(create_event))
        .route("/eventos/todos", get(all_events))
        .route("/eventos/disponibles", get(available_events))
        .route("/eventos/buscar", get(search_events))
        .route("/eventos/categoria/:id", get(events_by_category))
        .route(
            "/eventos/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route(
            "/inscripciones",
            get(list_enrollments).post(create_enrollment),
        )
        .route("/inscripciones/activas/:usuario_id", get(active_enrollments))
        .route(
            "/inscripciones/historial/:usuario_id",
            get(enrollment_history),
        )
        .route(
            "/inscripciones/:id",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
        .route("/stats/dashboard", get(dashboard))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

/// Record the request and resolve the bearer token
async fn authenticate(State(state): State<Shared>, mut request: Request, next: Next) -> Response {
    let line = match request.uri().query() {
        Some(query) => format!("{} {}?{}", request.method(), request.uri().path(), query),
        None => format!("{} {}", request.method(), request.uri().path()),
    };
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let user = {
        let mut s = state.lock().unwrap();
        s.requests.push(line);
        s.last_authorization = authorization.clone();

        authorization
            .as_deref()
            .and_then(|h| h.strip_prefix("Bearer "))
            .and_then(|token| s.tokens.get(token).copied())
            .and_then(|id| s.users.iter().find(|u| u.id == id).cloned())
    };

    if request.uri().path() == "/auth/login" {
        return next.run(request).await;
    }

    match user {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        None => detail(StatusCode::UNAUTHORIZED, "Token inválido o expirado"),
    }
}

fn text(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ============================================
// Auth
// ============================================

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    s.record_body("POST /auth/login", &body);

    let email = text(&body, "email");
    let password = text(&body, "password");

    let user = match s.users.iter().find(|u| u.email == email).cloned() {
        Some(user) if s.passwords.get(&user.id) == Some(&password) => user,
        _ => return detail(StatusCode::UNAUTHORIZED, "Credenciales inválidas"),
    };

    let token = match user.id {
        1 => StubBackend::ADMIN_TOKEN.to_string(),
        2 => StubBackend::CLIENT_TOKEN.to_string(),
        id => format!("token-{}", id),
    };
    s.tokens.insert(token.clone(), user.id);

    Json(json!({ "access_token": token, "token_type": "bearer", "user": user })).into_response()
}

// ============================================
// Users
// ============================================

async fn list_users(
    State(state): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let s = state.lock().unwrap();
    let skip = q.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit = q.get("limit").and_then(|v| v.parse().ok()).unwrap_or(usize::MAX);
    let users: Vec<&User> = s.users.iter().skip(skip).take(limit).collect();
    Json(json!(users)).into_response()
}

async fn search_users(
    State(state): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let s = state.lock().unwrap();
    let email = q.get("email").cloned().unwrap_or_default();
    let users: Vec<&User> = s.users.iter().filter(|u| contains(&u.email, &email)).collect();
    Json(json!(users)).into_response()
}

async fn users_by_role(State(state): State<Shared>, Path(rol): Path<String>) -> Response {
    let s = state.lock().unwrap();
    let users: Vec<&User> = s.users.iter().filter(|u| u.rol.as_str() == rol).collect();
    Json(json!(users)).into_response()
}

async fn count_users(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    Json(json!({ "total": s.users.len() })).into_response()
}

async fn get_user(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let s = state.lock().unwrap();
    match s.users.iter().find(|u| u.id == id) {
        Some(user) => Json(json!(user)).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Usuario no encontrado"),
    }
}

async fn create_user(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    s.record_body("POST /usuarios", &body);

    let email = text(&body, "email");
    if s.users.iter().any(|u| u.email == email) {
        return detail(StatusCode::BAD_REQUEST, "El email ya está registrado");
    }
    let password = text(&body, "password");
    if password.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "password"], "msg": "field required" }] })),
        )
            .into_response();
    }
    let rol = match text(&body, "rol").parse::<Rol>() {
        Ok(rol) => rol,
        Err(e) => return detail(StatusCode::UNPROCESSABLE_ENTITY, &e),
    };

    let user = User {
        id: s.allocate_id(),
        nombre: text(&body, "nombre"),
        email,
        rol,
    };
    s.passwords.insert(user.id, password);
    s.users.push(user.clone());
    (StatusCode::CREATED, Json(json!(user))).into_response()
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.record_body(&format!("PUT /usuarios/{}", id), &body);

    let Some(user) = s.users.iter_mut().find(|u| u.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Usuario no encontrado");
    };
    user.nombre = text(&body, "nombre");
    user.email = text(&body, "email");
    if let Ok(rol) = text(&body, "rol").parse() {
        user.rol = rol;
    }
    Json(json!(user)).into_response()
}

async fn delete_user(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let mut s = state.lock().unwrap();
    let before = s.users.len();
    s.users.retain(|u| u.id != id);
    if s.users.len() == before {
        return detail(StatusCode::NOT_FOUND, "Usuario no encontrado");
    }
    Json(json!({ "message": "Usuario eliminado" })).into_response()
}

// ============================================
// Categories
// ============================================

fn require_admin(user: &CurrentUser) -> Option<Response> {
    if user.0.is_admin() {
        None
    } else {
        Some(detail(StatusCode::FORBIDDEN, "Permisos insuficientes"))
    }
}

async fn list_categories(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    Json(json!(s.categories)).into_response()
}

async fn get_category(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let s = state.lock().unwrap();
    match s.categories.iter().find(|c| c.id == id) {
        Some(category) => Json(json!(category)).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Categoría no encontrada"),
    }
}

async fn create_category(
    State(state): State<Shared>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = require_admin(&user) {
        return denied;
    }
    let mut s = state.lock().unwrap();
    s.record_body("POST /categorias", &body);

    let descripcion = text(&body, "descripcion");
    let category = Category {
        id: s.allocate_id(),
        nombre: text(&body, "nombre"),
        descripcion: (!descripcion.is_empty()).then_some(descripcion),
    };
    s.categories.push(category.clone());
    (StatusCode::CREATED, Json(json!(category))).into_response()
}

async fn update_category(
    State(state): State<Shared>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Id>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = require_admin(&user) {
        return denied;
    }
    let mut s = state.lock().unwrap();
    s.record_body(&format!("PUT /categorias/{}", id), &body);

    let Some(category) = s.categories.iter_mut().find(|c| c.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Categoría no encontrada");
    };
    category.nombre = text(&body, "nombre");
    let descripcion = text(&body, "descripcion");
    category.descripcion = (!descripcion.is_empty()).then_some(descripcion);
    Json(json!(category)).into_response()
}

async fn delete_category(
    State(state): State<Shared>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Id>,
) -> Response {
    if let Some(denied) = require_admin(&user) {
        return denied;
    }
    let mut s = state.lock().unwrap();
    s.categories.retain(|c| c.id != id);
    StatusCode::NO_CONTENT.into_response()
}

// ============================================
// Events
// ============================================

async fn list_events(
    State(state): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let s = state.lock().unwrap();
    let categoria: Option<Id> = q.get("categoria_id").and_then(|v| v.parse().ok());
    let events: Vec<&Event> = s
        .events
        .iter()
        .filter(|e| categoria.is_none() || e.categoria_id == categoria)
        .collect();
    Json(json!(events)).into_response()
}

async fn all_events(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    Json(json!(s.events)).into_response()
}

async fn available_events(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    let events: Vec<&Event> = s
        .events
        .iter()
        .filter(|e| !s.closed_events.contains(&e.id))
        .collect();
    Json(json!(events)).into_response()
}

async fn search_events(
    State(state): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let s = state.lock().unwrap();
    let needle = q.get("q").cloned().unwrap_or_default();
    let events: Vec<&Event> = s
        .events
        .iter()
        .filter(|e| contains(&e.nombre, &needle) || contains(&e.descripcion, &needle))
        .collect();
    Json(json!(events)).into_response()
}

async fn events_by_category(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let s = state.lock().unwrap();
    let events: Vec<&Event> = s.events.iter().filter(|e| e.categoria_id == Some(id)).collect();
    Json(json!(events)).into_response()
}

async fn get_event(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let s = state.lock().unwrap();
    match s.events.iter().find(|e| e.id == id) {
        Some(event) => Json(json!(event)).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Evento no encontrado"),
    }
}

fn event_from_body(s: &StubState, id: Id, body: &Value) -> Event {
    let categoria_id = body.get("categoria_id").and_then(|v| v.as_i64());
    Event {
        id,
        nombre: text(body, "nombre"),
        descripcion: text(body, "descripcion"),
        fecha_inicio: text(body, "fecha_inicio"),
        fecha_fin: text(body, "fecha_fin"),
        lugar: text(body, "lugar"),
        cupos: body.get("cupos").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
        categoria_id,
        categoria: categoria_id.and_then(|cid| s.categories.iter().find(|c| c.id == cid).cloned()),
    }
}

async fn create_event(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    s.record_body("POST /eventos", &body);

    let id = s.allocate_id();
    let event = event_from_body(&s, id, &body);
    s.events.push(event.clone());
    (StatusCode::CREATED, Json(json!(event))).into_response()
}

async fn update_event(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.record_body(&format!("PUT /eventos/{}", id), &body);

    let updated = event_from_body(&s, id, &body);
    let Some(event) = s.events.iter_mut().find(|e| e.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Evento no encontrado");
    };
    *event = updated.clone();
    Json(json!(updated)).into_response()
}

async fn delete_event(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let mut s = state.lock().unwrap();
    s.events.retain(|e| e.id != id);
    Json(json!({ "message": "Evento eliminado" })).into_response()
}

// ============================================
// Enrollments
// ============================================

async fn list_enrollments(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    Json(json!(s.enrollments)).into_response()
}

async fn active_enrollments(State(state): State<Shared>, Path(usuario_id): Path<Id>) -> Response {
    let s = state.lock().unwrap();
    let rows: Vec<&Enrollment> = s
        .enrollments
        .iter()
        .filter(|i| i.usuario_id == usuario_id && !s.closed_events.contains(&i.evento_id))
        .collect();
    Json(json!(rows)).into_response()
}

async fn enrollment_history(State(state): State<Shared>, Path(usuario_id): Path<Id>) -> Response {
    let s = state.lock().unwrap();
    let rows: Vec<&Enrollment> = s
        .enrollments
        .iter()
        .filter(|i| i.usuario_id == usuario_id && s.closed_events.contains(&i.evento_id))
        .collect();
    Json(json!(rows)).into_response()
}

async fn get_enrollment(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let s = state.lock().unwrap();
    match s.enrollments.iter().find(|i| i.id == id) {
        Some(enrollment) => Json(json!(enrollment)).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Inscripción no encontrada"),
    }
}

async fn create_enrollment(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    s.record_body("POST /inscripciones", &body);

    let (Some(usuario_id), Some(evento_id)) = (
        body.get("usuario_id").and_then(|v| v.as_i64()),
        body.get("evento_id").and_then(|v| v.as_i64()),
    ) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "usuario_id y evento_id son obligatorios");
    };

    let Some(cupos) = s.events.iter().find(|e| e.id == evento_id).map(|e| e.cupos) else {
        return detail(StatusCode::NOT_FOUND, "Evento no encontrado");
    };
    let inscriptos = s.enrollments.iter().filter(|i| i.evento_id == evento_id).count();
    if inscriptos >= cupos as usize {
        return detail(StatusCode::BAD_REQUEST, "El evento no tiene cupos disponibles");
    }

    let enrollment = Enrollment {
        id: s.allocate_id(),
        usuario_id,
        evento_id,
        fecha_inscripcion: text(&body, "fecha_inscripcion"),
    };
    s.enrollments.push(enrollment.clone());
    (StatusCode::CREATED, Json(json!(enrollment))).into_response()
}

async fn update_enrollment(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.record_body(&format!("PUT /inscripciones/{}", id), &body);

    let Some(enrollment) = s.enrollments.iter_mut().find(|i| i.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Inscripción no encontrada");
    };
    if let Some(usuario_id) = body.get("usuario_id").and_then(|v| v.as_i64()) {
        enrollment.usuario_id = usuario_id;
    }
    if let Some(evento_id) = body.get("evento_id").and_then(|v| v.as_i64()) {
        enrollment.evento_id = evento_id;
    }
    enrollment.fecha_inscripcion = text(&body, "fecha_inscripcion");
    Json(json!(enrollment)).into_response()
}

async fn delete_enrollment(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let mut s = state.lock().unwrap();
    s.enrollments.retain(|i| i.id != id);
    Json(json!({ "message": "Inscripción eliminada" })).into_response()
}

// ============================================
// Stats
// ============================================

async fn dashboard(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    if s.fail_stats {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Error calculando estadísticas");
    }
    let activos = s
        .events
        .iter()
        .filter(|e| !s.closed_events.contains(&e.id))
        .count();
    Json(json!({
        "total_eventos": s.events.len(),
        "eventos_activos": activos,
        "total_usuarios": s.users.len(),
        "total_inscripciones": s.enrollments.len(),
        "total_categorias": s.categories.len(),
    }))
    .into_response()
}
