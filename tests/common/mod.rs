// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process stub of the Pet Manager API for integration tests.
//!
//! Serves the auth, pet and tutor endpoints on an ephemeral port, records
//! call counts and query strings, and exposes switches that force specific
//! failures (expired access token, broken refresh, broken login, 500s).

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use pet_manager_client::config::Config;
use pet_manager_client::session::{MemorySessionStorage, Session, SessionStorage};
use pet_manager_client::PetManagerClient;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mutable stub state shared with the test body.
#[derive(Default)]
pub struct StubState {
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// The access token the protected endpoints currently accept.
    pub valid_access: Mutex<String>,
    /// The refresh token the refresh endpoint currently accepts.
    pub valid_refresh: Mutex<String>,
    pub fail_login: AtomicBool,
    pub fail_refresh: AtomicBool,
    /// Force 401 on protected endpoints regardless of the presented token.
    pub always_unauthorized: AtomicBool,
    /// Force 500 on the pet list endpoint.
    pub fail_pet_list: AtomicBool,
    pub fail_unlink: AtomicBool,
    /// Extra latency applied when the pet list filter is `slow`.
    pub slow_list_ms: AtomicU64,
    pub pets: Mutex<Vec<Value>>,
    pub tutors: Mutex<Vec<Value>>,
    /// Active (tutor_id, pet_id) links.
    pub links: Mutex<Vec<(String, String)>>,
    /// Raw query strings seen by the pet list endpoint.
    pub pet_list_queries: Mutex<Vec<String>>,
    pub next_id: AtomicUsize,
}

impl StubState {
    fn new() -> Self {
        let state = Self::default();
        *state.valid_access.lock().unwrap() = "access-0".to_string();
        *state.valid_refresh.lock().unwrap() = "refresh-0".to_string();
        state.next_id.store(1000, Ordering::SeqCst);
        state
    }

    fn rotate_tokens(&self, reason: &str) -> (String, String) {
        let n = self.login_calls.load(Ordering::SeqCst) + self.refresh_calls.load(Ordering::SeqCst);
        let access = format!("access-{reason}-{n}");
        let refresh = format!("refresh-{reason}-{n}");
        *self.valid_access.lock().unwrap() = access.clone();
        *self.valid_refresh.lock().unwrap() = refresh.clone();
        (access, refresh)
    }

    pub fn current_access(&self) -> String {
        self.valid_access.lock().unwrap().clone()
    }

    /// Seed one pet and return its id.
    pub fn seed_pet(&self, nome: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
        self.pets.lock().unwrap().push(json!({
            "id": id,
            "nome": nome,
            "raca": "SRD",
            "idade": 3,
            "foto": null,
        }));
        id
    }

    pub fn seed_tutor(&self, nome: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
        self.tutors.lock().unwrap().push(json!({
            "id": id,
            "nome": nome,
            "email": format!("{}@example.com", nome.to_lowercase().replace(' ', ".")),
            "telefone": "11999990000",
            "endereco": "Rua das Flores, 1",
            "cpf": "12345678901",
            "foto": null,
        }));
        id
    }

    pub fn link(&self, tutor_id: u64, pet_id: u64) {
        self.links
            .lock()
            .unwrap()
            .push((tutor_id.to_string(), pet_id.to_string()));
    }

    pub fn links_snapshot(&self) -> Vec<(String, String)> {
        self.links.lock().unwrap().clone()
    }
}

pub struct Stub {
    pub base_url: String,
    pub state: Arc<StubState>,
}

/// Start the stub server on an ephemeral port.
pub async fn spawn_stub() -> Stub {
    let state = Arc::new(StubState::new());

    let app = Router::new()
        .route("/autenticacao/login", post(login))
        .route("/autenticacao/refresh", post(refresh))
        .route("/v1/pets", get(list_pets).post(create_pet))
        .route("/v1/pets/{id}", get(get_pet).put(update_pet).delete(delete_pet))
        .route("/v1/pets/{id}/fotos", post(upload_photo))
        .route("/v1/pets/{id}/fotos/{foto_id}", delete(delete_photo))
        .route("/v1/tutores", get(list_tutors).post(create_tutor))
        .route(
            "/v1/tutores/{id}",
            get(get_tutor).put(update_tutor).delete(delete_tutor),
        )
        .route("/v1/tutores/{id}/pets/{pet_id}", post(link_pet).delete(unlink_pet))
        .route("/v1/tutores/{id}/fotos", post(upload_photo))
        .route("/v1/tutores/{id}/fotos/{foto_id}", delete(delete_photo))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    Stub {
        base_url: format!("http://{addr}"),
        state,
    }
}

// ─── Client helpers ──────────────────────────────────────────────────────

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        api_timeout_ms: 5_000,
        username: "admin".to_string(),
        password: "admin".to_string(),
        reauth_timeout_ms: 2_000,
        session_file: None,
    }
}

/// Client with a session already persisted (possibly stale).
pub fn client_with_session(base_url: &str, access: &str, refresh: &str) -> PetManagerClient {
    let storage = Arc::new(MemorySessionStorage::new());
    storage
        .save(&Session {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            expires_at_epoch_ms: chrono::Utc::now().timestamp_millis() + 3_600_000,
        })
        .expect("seed session");
    PetManagerClient::with_storage(test_config(base_url), storage).expect("build client")
}

/// Client with a session matching what the stub currently accepts.
pub fn authed_client(stub: &Stub) -> PetManagerClient {
    client_with_session(&stub.base_url, &stub.state.current_access(), "refresh-0")
}

/// Client with no persisted session.
pub fn fresh_client(base_url: &str) -> PetManagerClient {
    PetManagerClient::with_storage(test_config(base_url), Arc::new(MemorySessionStorage::new()))
        .expect("build client")
}

// ─── Handlers ────────────────────────────────────────────────────────────

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "token invalido ou expirado"})),
    )
        .into_response()
}

fn check_auth(state: &StubState, headers: &HeaderMap) -> Result<(), Response> {
    if state.always_unauthorized.load(Ordering::SeqCst) {
        return Err(unauthorized());
    }
    match bearer(headers) {
        Some(token) if token == state.current_access() => Ok(()),
        _ => Err(unauthorized()),
    }
}

fn token_response(access: String, refresh: String) -> Response {
    Json(json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_in": 300,
        "refresh_expires_in": 1800,
    }))
    .into_response()
}

async fn login(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_login.load(Ordering::SeqCst) {
        return unauthorized();
    }
    if body.get("username").and_then(Value::as_str).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "credenciais ausentes"})),
        )
            .into_response();
    }
    let (access, refresh) = state.rotate_tokens("login");
    token_response(access, refresh)
}

async fn refresh(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    // Let concurrent 401s pile up behind the in-flight refresh.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    if state.fail_refresh.load(Ordering::SeqCst) {
        return unauthorized();
    }
    let presented = bearer(&headers).unwrap_or_default().to_string();
    if presented != *state.valid_refresh.lock().unwrap() {
        return unauthorized();
    }
    let (access, refresh) = state.rotate_tokens("refresh");
    token_response(access, refresh)
}

fn paginate(items: Vec<Value>, query: &str) -> Value {
    let mut page = 0u64;
    let mut size = 10u64;
    let mut nome: Option<String> = None;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let mut kv = pair.splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("page"), Some(v)) => page = v.parse().unwrap_or(0),
            (Some("size"), Some(v)) => size = v.parse().unwrap_or(10),
            (Some("nome"), Some(v)) => nome = Some(v.to_string()),
            _ => {}
        }
    }

    let filtered: Vec<Value> = match &nome {
        Some(n) => items
            .into_iter()
            .filter(|p| {
                p.get("nome")
                    .and_then(Value::as_str)
                    .is_some_and(|v| v.contains(n.as_str()))
            })
            .collect(),
        None => items,
    };

    let total = filtered.len() as u64;
    let start = (page * size) as usize;
    let content: Vec<Value> = filtered
        .into_iter()
        .skip(start)
        .take(size as usize)
        .collect();
    json!({
        "page": page,
        "size": size,
        "total": total,
        "pageCount": if size == 0 { 0 } else { total.div_ceil(size) },
        "content": content,
    })
}

async fn list_pets(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let query = query.unwrap_or_default();
    state.pet_list_queries.lock().unwrap().push(query.clone());

    if query.contains("nome=slow") {
        let delay = state.slow_list_ms.load(Ordering::SeqCst);
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    if state.fail_pet_list.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "erro interno"})),
        )
            .into_response();
    }
    let pets = state.pets.lock().unwrap().clone();
    Json(paginate(pets, &query)).into_response()
}

fn find_by_id(items: &[Value], id: &str) -> Option<Value> {
    items
        .iter()
        .find(|p| {
            p.get("id")
                .map(|v| match v {
                    Value::Number(n) => n.to_string() == id,
                    Value::String(s) => s == id,
                    _ => false,
                })
                .unwrap_or(false)
        })
        .cloned()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "recurso nao encontrado"})),
    )
        .into_response()
}

async fn get_pet(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let Some(mut pet) = find_by_id(&state.pets.lock().unwrap(), &id) else {
        return not_found();
    };
    // Expand linked tutors.
    let tutors = state.tutors.lock().unwrap();
    let linked: Vec<Value> = state
        .links
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, pet_id)| *pet_id == id)
        .filter_map(|(tutor_id, _)| find_by_id(&tutors, tutor_id))
        .collect();
    if !linked.is_empty() {
        pet["tutores"] = Value::Array(linked);
    }
    Json(pet).into_response()
}

async fn create_pet(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let pet = json!({
        "id": id,
        "nome": body.get("nome").cloned().unwrap_or(Value::Null),
        "raca": body.get("raca").cloned().unwrap_or(Value::Null),
        "idade": body.get("idade").cloned().unwrap_or(Value::Null),
        "foto": null,
    });
    state.pets.lock().unwrap().push(pet.clone());
    (StatusCode::CREATED, Json(pet)).into_response()
}

async fn update_pet(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let mut pets = state.pets.lock().unwrap();
    let Some(pet) = pets.iter_mut().find(|p| {
        p.get("id")
            .map(|v| v.to_string() == id || v.as_str() == Some(&id))
            .unwrap_or(false)
    }) else {
        return not_found();
    };
    for field in ["nome", "raca", "idade"] {
        if let Some(value) = body.get(field) {
            pet[field] = value.clone();
        }
    }
    Json(pet.clone()).into_response()
}

async fn delete_pet(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    state.delete_calls.fetch_add(1, Ordering::SeqCst);
    let mut pets = state.pets.lock().unwrap();
    let before = pets.len();
    pets.retain(|p| {
        !p.get("id")
            .map(|v| v.to_string() == id)
            .unwrap_or(false)
    });
    if pets.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn upload_photo(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let foto_id = state.next_id.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::CREATED,
        Json(json!({
            "id": foto_id,
            "nome": format!("foto-{id}.jpg"),
            "contentType": "image/jpeg",
            "url": format!("https://cdn.example.com/fotos/{foto_id}"),
        })),
    )
        .into_response()
}

async fn delete_photo(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path((_id, _foto_id)): Path<(String, String)>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_tutors(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let tutors = state.tutors.lock().unwrap().clone();
    Json(paginate(tutors, &query.unwrap_or_default())).into_response()
}

async fn get_tutor(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let Some(mut tutor) = find_by_id(&state.tutors.lock().unwrap(), &id) else {
        return not_found();
    };
    let pets = state.pets.lock().unwrap();
    let linked: Vec<Value> = state
        .links
        .lock()
        .unwrap()
        .iter()
        .filter(|(tutor_id, _)| *tutor_id == id)
        .filter_map(|(_, pet_id)| find_by_id(&pets, pet_id))
        .collect();
    if !linked.is_empty() {
        tutor["pets"] = Value::Array(linked);
    }
    Json(tutor).into_response()
}

async fn create_tutor(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let tutor = json!({
        "id": id,
        "nome": body.get("nome").cloned().unwrap_or(Value::Null),
        "email": body.get("email").cloned().unwrap_or(Value::Null),
        "telefone": body.get("telefone").cloned().unwrap_or(Value::Null),
        "endereco": body.get("endereco").cloned().unwrap_or(Value::Null),
        "cpf": body.get("cpf").cloned().unwrap_or(Value::Null),
        "foto": null,
    });
    state.tutors.lock().unwrap().push(tutor.clone());
    (StatusCode::CREATED, Json(tutor)).into_response()
}

async fn update_tutor(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let mut tutors = state.tutors.lock().unwrap();
    let Some(tutor) = tutors.iter_mut().find(|t| {
        t.get("id")
            .map(|v| v.to_string() == id)
            .unwrap_or(false)
    }) else {
        return not_found();
    };
    for field in ["nome", "email", "telefone", "endereco", "cpf"] {
        if let Some(value) = body.get(field) {
            tutor[field] = value.clone();
        }
    }
    Json(tutor.clone()).into_response()
}

async fn delete_tutor(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    let mut tutors = state.tutors.lock().unwrap();
    let before = tutors.len();
    tutors.retain(|t| {
        !t.get("id")
            .map(|v| v.to_string() == id)
            .unwrap_or(false)
    });
    if tutors.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn link_pet(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path((tutor_id, pet_id)): Path<(String, String)>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    state.links.lock().unwrap().push((tutor_id, pet_id));
    StatusCode::NO_CONTENT.into_response()
}

async fn unlink_pet(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path((tutor_id, pet_id)): Path<(String, String)>,
) -> Response {
    if let Err(resp) = check_auth(&state, &headers) {
        return resp;
    }
    if state.fail_unlink.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "erro ao desvincular"})),
        )
            .into_response();
    }
    state
        .links
        .lock()
        .unwrap()
        .retain(|(t, p)| !(*t == tutor_id && *p == pet_id));
    StatusCode::NO_CONTENT.into_response()
}
