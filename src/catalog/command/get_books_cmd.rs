use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookListDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::context::Context;

pub struct GetBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetBooksCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct GetBooksCommandRequest {}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GetBooksCommandResponse {
    pub books: BookListDto,
}

#[async_trait]
impl Command<GetBooksCommandRequest, GetBooksCommandResponse> for GetBooksCommand {
    async fn execute(&self, ctx: &Context, _req: GetBooksCommandRequest) -> Result<GetBooksCommandResponse, CommandError> {
        self.catalog_service.find_books(ctx).await
            .map_err(CommandError::from)
            .map(|books| GetBooksCommandResponse { books: BookListDto::from(books.as_slice()) })
    }
}
