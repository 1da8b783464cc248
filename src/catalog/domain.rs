pub mod service;

use async_trait::async_trait;
use uuid::Uuid;
use crate::books::domain::{Book, NewBook};
use crate::core::context::Context;
use crate::core::library::LibraryResult;

/// Catalog operations offered to the HTTP adapter.
///
/// Errors keep their kind through the service, so `NotFound` and
/// `AlreadyExists` can still be matched after context has been added.
#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, ctx: &Context, new_book: NewBook) -> LibraryResult<Book>;
    async fn find_book_by_id(&self, ctx: &Context, id: Uuid) -> LibraryResult<Book>;
    async fn find_books(&self, ctx: &Context) -> LibraryResult<Vec<Book>>;
    async fn remove_book(&self, ctx: &Context, id: Uuid) -> LibraryResult<()>;
}
