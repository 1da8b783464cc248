use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::NewBook;
use crate::books::dto::{BookDto, NewBookDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::context::Context;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::validation::Validator;

pub struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct AddBookCommandRequest {
    pub book: NewBookDto,
}

impl AddBookCommandRequest {
    pub fn new(book: NewBookDto) -> Self {
        Self {
            book,
        }
    }

    pub fn build_book(&self) -> LibraryResult<NewBook> {
        let book = &self.book;
        Validator::new()
            .required("title", book.title.as_str())
            .required("authors", book.authors.as_str())
            .required("publisher", book.publisher.as_str())
            .min("pages", book.pages, 1)
            .isbn("isbn", book.isbn.as_str())
            .validate()?;
        let pages = u32::try_from(book.pages).map_err(|_| LibraryError::validation(
            format!("pages {} is out of range", book.pages).as_str(), Some("400".to_string())))?;
        Ok(NewBook {
            title: book.title.to_string(),
            authors: book.authors.to_string(),
            publisher: book.publisher.to_string(),
            pages,
            isbn: book.isbn.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, ctx: &Context, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let new_book = req.build_book()?;
        self.catalog_service.add_book(ctx, new_book).await
            .map_err(CommandError::from).map(|book| AddBookCommandResponse::new(BookDto::from(&book)))
    }
}
