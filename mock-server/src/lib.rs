//! In-memory backend for the todo client.
//!
//! Serves the same REST surface the browser client talks to: register and
//! login under `/api/auth`, and per-user todo CRUD under `/api/todos`
//! guarded by an opaque bearer token. Tokens expire after
//! [`DEFAULT_TOKEN_TTL`] unless the router is built with another lifetime.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};
use uuid::Uuid;

pub mod config;
pub mod error;

use error::AppError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

/// Body for create and update. An absent `completed` means `false`.
#[derive(Deserialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Tokens live for a day, like the original backend's JWTs.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct IssuedToken {
    username: String,
    issued: Instant,
}

struct OwnedTodo {
    owner: String,
    todo: Todo,
}

pub struct Store {
    /// username -> SHA-256 hex digest of the password
    users: HashMap<String, String>,
    tokens: HashMap<String, IssuedToken>,
    token_ttl: Duration,
    todos: BTreeMap<i64, OwnedTodo>,
    last_id: i64,
}

impl Store {
    pub fn with_token_ttl(token_ttl: Duration) -> Self {
        Self {
            users: HashMap::new(),
            tokens: HashMap::new(),
            token_ttl,
            todos: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::with_token_ttl(DEFAULT_TOKEN_TTL)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_token_ttl(DEFAULT_TOKEN_TTL)
}

pub fn app_with_token_ttl(token_ttl: Duration) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_token_ttl(token_ttl)));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .layer(cors)
        .with_state(db)
}

pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

/// Like [`run`], but returns once `shutdown` resolves and in-flight requests finish.
pub async fn run_until<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router).with_graceful_shutdown(shutdown).await
}

fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Resolve the bearer token to a username. Expired tokens are rejected like unknown ones.
async fn authenticate(db: &Db, headers: &HeaderMap) -> Result<String, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;
    let store = db.read().await;
    let entry = store.tokens.get(token).ok_or(AppError::Unauthorized)?;
    if entry.issued.elapsed() >= store.token_ttl {
        debug!("rejected expired token for {}", entry.username);
        return Err(AppError::Unauthorized);
    }
    Ok(entry.username.clone())
}

async fn register(State(db): State<Db>, Json(input): Json<Credentials>) -> Result<&'static str, AppError> {
    let mut store = db.write().await;
    if store.users.contains_key(&input.username) {
        return Err(AppError::UsernameTaken);
    }
    info!("registered {}", input.username);
    store.users.insert(input.username, digest(&input.password));
    Ok("User registered successfully!")
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Result<Json<AuthResponse>, AppError> {
    let mut store = db.write().await;
    let valid = store
        .users
        .get(&input.username)
        .is_some_and(|stored| *stored == digest(&input.password));
    if !valid {
        debug!("rejected login for {}", input.username);
        return Err(AppError::InvalidCredentials);
    }
    let token = Uuid::new_v4().to_string();
    store.tokens.insert(
        token.clone(),
        IssuedToken {
            username: input.username.clone(),
            issued: Instant::now(),
        },
    );
    info!("issued token for {}", input.username);
    Ok(Json(AuthResponse {
        token,
        username: input.username,
    }))
}

async fn list_todos(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<Todo>>, AppError> {
    let user = authenticate(&db, &headers).await?;
    let store = db.read().await;
    let todos: Vec<Todo> = store
        .todos
        .values()
        .filter(|entry| entry.owner == user)
        .map(|entry| entry.todo.clone())
        .collect();
    debug!("listing {} todos for {user}", todos.len());
    Ok(Json(todos))
}

async fn create_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<TodoPayload>,
) -> Result<Json<Todo>, AppError> {
    let owner = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    store.last_id += 1;
    let todo = Todo {
        id: store.last_id,
        title: input.title,
        completed: input.completed,
    };
    debug!("{owner} created todo {}", todo.id);
    store.todos.insert(
        todo.id,
        OwnedTodo {
            owner,
            todo: todo.clone(),
        },
    );
    Ok(Json(todo))
}

async fn get_todo(State(db): State<Db>, headers: HeaderMap, Path(id): Path<i64>) -> Result<Json<Todo>, AppError> {
    let user = authenticate(&db, &headers).await?;
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .filter(|entry| entry.owner == user)
        .map(|entry| Json(entry.todo.clone()))
        .ok_or(AppError::Forbidden("access"))
}

async fn update_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<TodoPayload>,
) -> Result<Json<Todo>, AppError> {
    let user = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    let entry = store
        .todos
        .get_mut(&id)
        .filter(|entry| entry.owner == user)
        .ok_or(AppError::Forbidden("update"))?;
    entry.todo.title = input.title;
    entry.todo.completed = input.completed;
    debug!("{user} updated todo {id}");
    Ok(Json(entry.todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    let user = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    if !store.todos.get(&id).is_some_and(|entry| entry.owner == user) {
        return Err(AppError::Forbidden("delete"));
    }
    store.todos.remove(&id);
    debug!("{user} deleted todo {id}");
    Ok("Todo deleted successfully!")
}
