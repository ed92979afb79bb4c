use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub struct Store {
    next_id: u64,
    categories: BTreeMap<u64, Category>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            categories: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    admin_token: Option<Arc<str>>,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

/// Router with open `/admin` routes.
pub fn app() -> Router {
    router(None)
}

/// Router whose `/admin` routes require `Authorization: Bearer <token>`.
pub fn app_with_admin_token(token: impl Into<String>) -> Router {
    let token: String = token.into();
    router(Some(Arc::from(token)))
}

fn router(admin_token: Option<Arc<str>>) -> Router {
    let state = AppState {
        db: Db::default(),
        admin_token,
    };

    let public = Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category));

    let admin = Router::new()
        .route("/admin/categories", post(create_category))
        .route("/admin/categories/{id}", put(update_category).delete(delete_category))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.admin_token.as_deref() else {
        return next.run(request).await;
    };
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if presented == Some(expected) {
        next.run(request).await
    } else {
        tracing::warn!(path = %request.uri().path(), "rejected admin request");
        error(StatusCode::UNAUTHORIZED, "Administrator token required.").into_response()
    }
}

fn validated_name(input: CategoryInput) -> ApiResult<String> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Category name must not be empty."));
    }
    Ok(name.to_string())
}

fn not_found(id: u64) -> (StatusCode, Json<ErrorBody>) {
    error(StatusCode::NOT_FOUND, format!("Category with id {id} not found."))
}

async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    let store = state.db.read().await;
    Json(store.categories.values().cloned().collect())
}

async fn get_category(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<Category>> {
    let store = state.db.read().await;
    store.categories.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let name = validated_name(input)?;
    let mut store = state.db.write().await;
    let category = Category {
        id: store.next_id,
        name,
    };
    store.next_id += 1;
    store.categories.insert(category.id, category.clone());
    tracing::info!(id = category.id, "created category");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<Json<Category>> {
    let name = validated_name(input)?;
    let mut store = state.db.write().await;
    let category = store.categories.get_mut(&id).ok_or_else(|| not_found(id))?;
    category.name = name;
    Ok(Json(category.clone()))
}

async fn delete_category(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    let mut store = state.db.write().await;
    store
        .categories
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(id))
}
