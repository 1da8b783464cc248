use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::LibraryResult;

// Repository is the storage capability every backend provides. Implementations
// report a missing id as NotFound and a colliding id as AlreadyExists, any other
// failure is an opaque backend error.
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // saves a new entity, never overwrites an existing one
    async fn save(&self, entity: &Entity) -> LibraryResult<()>;

    // get an entity
    async fn find_one(&self, id: Uuid) -> LibraryResult<Entity>;

    // returns entities in no particular order, possibly a bounded subset
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;

    // delete an existing entity
    async fn delete(&self, id: Uuid) -> LibraryResult<()>;
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}
