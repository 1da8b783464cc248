use uuid::Uuid;
use crate::core::domain::Identifiable;

// Book is a catalog record. The id is assigned once by the catalog service and
// never changes, there is no update operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub pages: u32,
    pub isbn: String,
}

// NewBook carries everything needed to create a Book except its id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBook {
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub pages: u32,
    pub isbn: String,
}

impl Book {
    pub fn new(id: Uuid, new_book: NewBook) -> Self {
        Self {
            id,
            title: new_book.title,
            authors: new_book.authors,
            publisher: new_book.publisher,
            pages: new_book.pages,
            isbn: new_book.isbn,
        }
    }
}

impl NewBook {
    pub fn new(title: &str, authors: &str, publisher: &str, pages: u32, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            authors: authors.to_string(),
            publisher: publisher.to_string(),
            pages,
            isbn: isbn.to_string(),
        }
    }
}

impl Identifiable for Book {
    fn key(&self) -> String {
        self.id.to_string()
    }
}
