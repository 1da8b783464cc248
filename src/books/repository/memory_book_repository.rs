use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

/// Process-local book store guarded by a reader-writer lock.
///
/// Records are cloned in and out, so callers never alias stored state.
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<HashMap<String, Book>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Book> for MemoryBookRepository {
    async fn save(&self, entity: &Book) -> LibraryResult<()> {
        let mut books = self.books.write().await;
        let key = entity.key();
        if books.contains_key(&key) {
            return Err(LibraryError::already_exists(
                format!("memory.save: book {} already exists", key).as_str()));
        }
        debug!(id = key.as_str(), "memory.save");
        books.insert(key, entity.clone());
        Ok(())
    }

    async fn find_one(&self, id: Uuid) -> LibraryResult<Book> {
        let books = self.books.read().await;
        books.get(&id.to_string()).cloned().ok_or_else(|| LibraryError::not_found(
            format!("memory.findone: book {} not found", id).as_str()))
    }

    async fn find_all(&self) -> LibraryResult<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> LibraryResult<()> {
        let mut books = self.books.write().await;
        if books.remove(&id.to_string()).is_none() {
            return Err(LibraryError::not_found(
                format!("memory.delete: book {} not found", id).as_str()));
        }
        debug!(id = %id, "memory.delete");
        Ok(())
    }
}
