use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::get_books_cmd::{GetBooksCommand, GetBooksCommandRequest, GetBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;

pub async fn build_state(config: &Configuration) -> LibraryResult<AppState> {
    let svc = factory::create_catalog_service(config).await?;
    Ok(AppState::new(svc, config.request_timeout()))
}

// All four routes, used when the catalog runs as a single function.
pub fn catalog_routes(state: AppState) -> Router<(), lambda_http::Body> {
    Router::new()
        .route("/books", post(add_book).get(find_books))
        .route("/books/:id", get(find_book_by_id).delete(remove_book))
        .with_state(state)
}

pub async fn add_book(
    State(state): State<AppState>,
    body: Bytes) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_slice(&body).map_err(json_to_server_error)?;
    let ctx = state.request_context();
    let res = AddBookCommand::new(state.catalog_service.clone()).execute(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let ctx = state.request_context();
    let req = GetBookCommandRequest::new(book_id.as_str());
    let res = GetBookCommand::new(state.catalog_service.clone()).execute(&ctx, req).await?;
    Ok(Json(res))
}

pub async fn find_books(
    State(state): State<AppState>) -> Result<Json<GetBooksCommandResponse>, ServerError> {
    let ctx = state.request_context();
    let res = GetBooksCommand::new(state.catalog_service.clone())
        .execute(&ctx, GetBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<StatusCode, ServerError> {
    let ctx = state.request_context();
    let req = RemoveBookCommandRequest::new(book_id.as_str());
    RemoveBookCommand::new(state.catalog_service.clone()).execute(&ctx, req).await?;
    Ok(StatusCode::NO_CONTENT)
}
