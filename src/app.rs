use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::{BookStore, Database, MemoryStore, PgBookStore, PgUserStore, UserStore};
use crate::handlers::{books, health, login, users};
use crate::middleware::jwt_auth_middleware;

/// Everything a handler needs, injected through the router instead of globals
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
    /// Present when running against PostgreSQL; used by the health check
    pub database: Option<Database>,
}

impl AppState {
    pub fn postgres(config: AppConfig, database: Database) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(PgUserStore::new(&database)),
            books: Arc::new(PgBookStore::new(&database)),
            database: Some(database),
        }
    }

    pub fn in_memory(config: AppConfig, store: Arc<MemoryStore>) -> Self {
        Self {
            config: Arc::new(config),
            users: store.clone(),
            books: store,
            database: None,
        }
    }
}

pub fn app(state: AppState) -> Router {
    // Token required; user routes additionally pass the ownership gate in the handler
    let protected = Router::new()
        .route("/users/:id", get(users::user_get))
        .route(
            "/jwt/users/:id",
            get(users::user_get)
                .put(users::user_put)
                .delete(users::user_delete),
        )
        .route(
            "/jwt/books/:id",
            axum::routing::put(books::book_put).delete(books::book_delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/books", get(books::books_get).post(books::book_post))
        .route("/books/:id", get(books::book_get))
        .route("/users", get(users::users_get).post(users::user_post))
        .route("/login", post(login::login_post))
        .merge(protected);

    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}
