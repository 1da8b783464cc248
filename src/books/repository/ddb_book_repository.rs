use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;
use uuid::Uuid;
use crate::books::domain::Book;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{Item, parse_item, parse_number_attribute, parse_string_field, TableClient};

// FindAll reads a single scan page of at most this many items.
pub const DEFAULT_TABLE_SCAN_LIMIT: i32 = 25;

const SAVE_CONDITION: &str = "attribute_not_exists(id)";
const DELETE_CONDITION: &str = "attribute_exists(id)";

pub struct DDBBookRepository {
    client: Box<dyn TableClient>,
    table_name: String,
}

impl DDBBookRepository {
    pub fn new(client: Box<dyn TableClient>, table_name: &str) -> LibraryResult<Self> {
        if table_name.trim().is_empty() {
            return Err(LibraryError::configuration("ddb: table name is required"));
        }
        Ok(Self {
            client,
            table_name: table_name.to_string(),
        })
    }
}

fn book_key(id: Uuid) -> Item {
    HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
}

fn book_to_item(book: &Book) -> LibraryResult<Item> {
    let val = serde_json::to_value(BookDto::from(book))?;
    parse_item(val)
}

fn item_to_book(item: &Item) -> LibraryResult<Book> {
    Book::try_from(BookDto {
        id: parse_string_field("id", item)?,
        title: parse_string_field("title", item)?,
        authors: parse_string_field("authors", item)?,
        publisher: parse_string_field("publisher", item)?,
        pages: parse_number_attribute("pages", item)?,
        isbn: parse_string_field("isbn", item)?,
    })
}

#[async_trait]
impl Repository<Book> for DDBBookRepository {
    async fn save(&self, entity: &Book) -> LibraryResult<()> {
        let item = book_to_item(entity).map_err(|err| err.context("ddb.save marshal"))?;
        debug!(table = self.table_name.as_str(), item = ?item, "ddb.save putitem");
        self.client.put(self.table_name.as_str(), item, Some(SAVE_CONDITION)).await
            .map_err(|err| err.context("ddb.save putitem"))
    }

    async fn find_one(&self, id: Uuid) -> LibraryResult<Book> {
        let item = self.client.get(self.table_name.as_str(), book_key(id)).await
            .map_err(|err| err.context("ddb.findone getitem"))?;
        debug!(table = self.table_name.as_str(), item = ?item, "ddb.findone getitem");
        match item {
            Some(item) if !item.is_empty() => {
                item_to_book(&item).map_err(|err| err.context("ddb.findone unmarshal"))
            }
            _ => Err(LibraryError::not_found(format!("ddb.findone: book {} not found", id).as_str())),
        }
    }

    async fn find_all(&self) -> LibraryResult<Vec<Book>> {
        let items = self.client.scan_with_limit(self.table_name.as_str(), DEFAULT_TABLE_SCAN_LIMIT).await
            .map_err(|err| err.context("ddb.findall scan"))?;
        debug!(table = self.table_name.as_str(), count = items.len(), "ddb.findall scan");
        items.iter()
            .map(|item| item_to_book(item).map_err(|err| err.context("ddb.findall unmarshal")))
            .collect()
    }

    async fn delete(&self, id: Uuid) -> LibraryResult<()> {
        debug!(table = self.table_name.as_str(), id = %id, "ddb.delete deleteitem");
        self.client.delete(self.table_name.as_str(), book_key(id), Some(DELETE_CONDITION)).await
            .map_err(|err| err.context(format!("ddb.delete deleteitem: book {}", id).as_str()))
    }
}
