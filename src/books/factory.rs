use std::sync::Arc;
use tracing::warn;
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, ensure_table};

pub async fn create_book_repository(config: &Configuration) -> LibraryResult<Arc<BookRepository>> {
    config.validate()?;
    match config.store() {
        RepositoryStore::Memory => {
            Ok(Arc::new(MemoryBookRepository::new()))
        }
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config).await;
            Ok(Arc::new(DDBBookRepository::new(Box::new(client), config.table_name.as_str())?))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            if let Err(err) = ensure_table(&client, config.table_name.as_str(), "id").await {
                warn!(table = config.table_name.as_str(), error = %err, "failed to prepare local table");
            }
            Ok(Arc::new(DDBBookRepository::new(Box::new(client), config.table_name.as_str())?))
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::books::domain::{Book, NewBook};
    use crate::books::factory::create_book_repository;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_memory_repository() {
        let repo = create_book_repository(&Configuration::memory()).await.expect("should create repository");
        let book = Book::new(Uuid::new_v4(), NewBook::new("title", "authors", "publisher", 1, "978-0547928227"));
        repo.save(&book).await.expect("should save");
        assert_eq!(book, repo.find_one(book.id).await.expect("should find"));
    }

    #[tokio::test]
    async fn test_should_start_when_local_table_setup_fails() {
        // nothing listens on port 1, so table setup fails and startup carries on
        let config = Configuration::local("books", "http://127.0.0.1:1");
        let repo = create_book_repository(&config).await.expect("should create repository");
        let err = repo.find_all().await.expect_err("should fail without an endpoint");
        assert!(!err.is_not_found());
        assert!(matches!(err, LibraryError::Database { .. } | LibraryError::CurrentlyUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_should_reject_missing_table_name() {
        let res = create_book_repository(&Configuration::new("")).await;
        assert!(matches!(res, Err(LibraryError::Configuration { .. })));
    }
}
