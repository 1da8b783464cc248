use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::context::Context;
use crate::core::library::LibraryError;

pub struct GetBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetBookCommandRequest {
    pub book_id: String,
}

impl GetBookCommandRequest {
    pub fn new(book_id: &str) -> Self {
        Self {
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GetBookCommandResponse {
    pub book: BookDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, ctx: &Context, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        let id = Uuid::parse_str(req.book_id.as_str()).map_err(LibraryError::from)?;
        self.catalog_service.find_book_by_id(ctx, id).await
            .map_err(CommandError::from).map(|book| GetBookCommandResponse::new(BookDto::from(&book)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::books::domain::NewBook;
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::context::Context;
    use crate::core::domain::Configuration;

    lazy_static! {
        static ref SVC: AsyncOnce<Arc<dyn CatalogService>> = AsyncOnce::new(async {
            factory::create_catalog_service(&Configuration::memory()).await.expect("should create service")
        });
    }

    #[tokio::test]
    async fn test_should_run_get_book() {
        let svc = SVC.get().await.clone();
        let ctx = Context::background();
        let book = svc.add_book(&ctx, NewBook::new("The Hobbit", "J.R.R. Tolkien", "Allen & Unwin", 310, "978-0547928227"))
            .await.expect("should add book");

        let cmd = GetBookCommand::new(svc);
        let loaded = cmd.execute(&ctx, GetBookCommandRequest::new(book.id.to_string().as_str()))
            .await.expect("should get book");
        assert_eq!(book.id.to_string(), loaded.book.id);
        assert_eq!(book.isbn, loaded.book.isbn);
    }

    #[tokio::test]
    async fn test_should_fail_get_book_for_bad_or_unknown_id() {
        let cmd = GetBookCommand::new(SVC.get().await.clone());
        let ctx = Context::background();
        let err = cmd.execute(&ctx, GetBookCommandRequest::new("42")).await.expect_err("should reject id");
        assert!(matches!(err, CommandError::InvalidIdentifier { .. }));

        let err = cmd.execute(&ctx, GetBookCommandRequest::new(Uuid::new_v4().to_string().as_str()))
            .await.expect_err("should not find");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
