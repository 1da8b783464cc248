use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn key(&self) -> String;
}

// Configuration abstracts startup options of the catalog functions. It is read
// once from the process environment and passed down explicitly.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    // STORAGE_MEMORY
    #[serde(default)]
    pub storage_memory: bool,
    // TABLE_NAME
    #[serde(default)]
    pub table_name: String,
    // AWS_ENDPOINT_DEBUG, e.g. http://localhost:4566 for LocalStack
    #[serde(default, rename = "aws_endpoint_debug")]
    pub endpoint: Option<String>,
    // AWS_CLIENT_DEBUG
    #[serde(default, rename = "aws_client_debug")]
    pub client_log: bool,
    // REQUEST_TIMEOUT_MS
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

impl Configuration {
    pub fn new(table_name: &str) -> Self {
        Configuration {
            storage_memory: false,
            table_name: table_name.to_string(),
            endpoint: None,
            client_log: false,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    pub fn memory() -> Self {
        Configuration {
            storage_memory: true,
            ..Configuration::new("")
        }
    }

    pub fn local(table_name: &str, endpoint: &str) -> Self {
        Configuration {
            endpoint: Some(endpoint.to_string()),
            ..Configuration::new(table_name)
        }
    }

    // Loads an optional `.env` file and then reads the process environment.
    pub fn load() -> LibraryResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env_map(None)
    }

    // Reads the given map as if it was the process environment, or the real
    // environment when `source` is None.
    pub fn from_env_map(source: Option<config::Map<String, String>>) -> LibraryResult<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default().source(source))
            .build()?;
        let configuration: Configuration = cfg.try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn store(&self) -> RepositoryStore {
        if self.storage_memory {
            RepositoryStore::Memory
        } else if self.endpoint().is_some() {
            RepositoryStore::LocalDynamoDB
        } else {
            RepositoryStore::DynamoDB
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.store() != RepositoryStore::Memory && self.table_name.trim().is_empty() {
            return Err(LibraryError::configuration("missing TABLE_NAME environment variable"));
        }
        Ok(())
    }
}

// IdGenerator hands out identifiers for newly created records.
pub trait IdGenerator: Sync + Send {
    fn next_id(&self) -> Uuid;
}

// RandomIdGenerator returns random (v4) UUIDs backed by the OS random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

// FixedIdGenerator always returns the same id.
#[derive(Debug, Clone, Copy)]
pub struct FixedIdGenerator(pub Uuid);

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> Uuid {
        self.0
    }
}

// SequenceIdGenerator returns the preset ids in order and random ids once they run out.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    ids: Mutex<VecDeque<Uuid>>,
}

impl SequenceIdGenerator {
    pub fn new(ids: Vec<Uuid>) -> Self {
        Self {
            ids: Mutex::new(ids.into()),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> Uuid {
        if let Ok(mut ids) = self.ids.lock() {
            if let Some(id) = ids.pop_front() {
                return id;
            }
        }
        Uuid::new_v4()
    }
}
