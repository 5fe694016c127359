use axum::{
    body::Bytes,
    extract::{Path, State},
};

use crate::app::AppState;
use crate::database::models::{Book, BookInput};
use crate::error::Resource;
use crate::middleware::{respond, respond_one, ApiResponse, ApiResult};

use super::utils::{bind, parse_id};

/// GET /books
pub async fn books_get(State(state): State<AppState>) -> ApiResult<Vec<Book>> {
    respond(state.books.find_all().await)
}

/// GET /books/:id
pub async fn book_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Book> {
    let id = parse_id(&id, Resource::Book)?;
    respond_one(state.books.find(id).await)
}

/// POST /books
pub async fn book_post(State(state): State<AppState>, body: Bytes) -> ApiResult<Book> {
    let input: BookInput = bind(&body);
    let book = state.books.create(input).await?;
    tracing::info!("Created book {}", book.id);
    Ok(ApiResponse::success(book))
}

/// PUT /jwt/books/:id - any authenticated caller; books have no owner
pub async fn book_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Book> {
    let id = parse_id(&id, Resource::Book)?;
    let patch: BookInput = bind(&body);
    respond_one(state.books.update(id, patch).await)
}

/// DELETE /jwt/books/:id
pub async fn book_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<&'static str> {
    let id = parse_id(&id, Resource::Book)?;
    respond(state.books.delete(id).await)
}
