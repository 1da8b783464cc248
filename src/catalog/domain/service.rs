use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;
use crate::books::domain::{Book, NewBook};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::context::Context;
use crate::core::domain::{IdGenerator, RandomIdGenerator};
use crate::core::library::LibraryResult;

pub struct CatalogServiceImpl {
    book_repository: Arc<BookRepository>,
    id_generator: Box<dyn IdGenerator>,
}

impl CatalogServiceImpl {
    pub fn new(book_repository: Arc<BookRepository>) -> Self {
        Self::with_generator(book_repository, Box::new(RandomIdGenerator))
    }

    pub fn with_generator(book_repository: Arc<BookRepository>, id_generator: Box<dyn IdGenerator>) -> Self {
        Self {
            book_repository,
            id_generator,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, ctx: &Context, new_book: NewBook) -> LibraryResult<Book> {
        let book = Book::new(self.id_generator.next_id(), new_book);
        ctx.run("book repository", self.book_repository.save(&book)).await
            .map_err(|err| err.context("save"))?;
        info!(id = %book.id, title = book.title.as_str(), "book added");
        Ok(book)
    }

    async fn find_book_by_id(&self, ctx: &Context, id: Uuid) -> LibraryResult<Book> {
        ctx.run("book repository", self.book_repository.find_one(id)).await
            .map_err(|err| err.context(format!("findone: bookID[{}]", id).as_str()))
    }

    async fn find_books(&self, ctx: &Context) -> LibraryResult<Vec<Book>> {
        ctx.run("book repository", self.book_repository.find_all()).await
            .map_err(|err| err.context("findall"))
    }

    async fn remove_book(&self, ctx: &Context, id: Uuid) -> LibraryResult<()> {
        ctx.run("book repository", self.book_repository.delete(id)).await
            .map_err(|err| err.context(format!("delete: bookID[{}]", id).as_str()))?;
        info!(id = %id, "book removed");
        Ok(())
    }
}
