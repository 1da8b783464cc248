use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::core::library::{LibraryError, LibraryResult};

// BookDto is the flat record shape shared by the HTTP API and the DynamoDB item,
// with the id in its canonical hyphenated text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub pages: i64,
    pub isbn: String,
}

// NewBookDto is the create request body. Missing fields default to their zero
// value and are rejected by validation rather than by the JSON decoder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBookDto {
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub pages: i64,
    pub isbn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookListDto {
    pub books: Vec<BookDto>,
}

impl From<&[Book]> for BookListDto {
    fn from(other: &[Book]) -> Self {
        Self {
            books: other.iter().map(BookDto::from).collect(),
        }
    }
}

impl From<&Book> for BookDto {
    fn from(other: &Book) -> Self {
        Self {
            id: other.id.to_string(),
            title: other.title.to_string(),
            authors: other.authors.to_string(),
            publisher: other.publisher.to_string(),
            pages: i64::from(other.pages),
            isbn: other.isbn.to_string(),
        }
    }
}

// Stored records are trusted to be well formed, so a bad id or page count is a
// serialization failure rather than a caller error.
impl TryFrom<BookDto> for Book {
    type Error = LibraryError;

    fn try_from(other: BookDto) -> LibraryResult<Self> {
        let id = Uuid::parse_str(other.id.as_str()).map_err(|err| LibraryError::serialization(
            format!("malformed book id {:?} {}", other.id, err).as_str()))?;
        let pages = u32::try_from(other.pages).map_err(|_| LibraryError::serialization(
            format!("malformed page count {} for book {}", other.pages, id).as_str()))?;
        Ok(Self {
            id,
            title: other.title,
            authors: other.authors,
            publisher: other.publisher,
            pages,
            isbn: other.isbn,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;
    use crate::books::domain::{Book, NewBook};
    use crate::books::dto::{BookDto, BookListDto, NewBookDto};
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_serialize_wire_shape() {
        let id = Uuid::parse_str("ad8b59c2-5fe6-4267-b0cf-6d2f9eb1c812").expect("valid uuid");
        let book = Book::new(id, NewBook::new("The Hobbit", "J.R.R. Tolkien", "Allen & Unwin", 310, "978-0547928227"));
        let val = serde_json::to_value(BookDto::from(&book)).expect("should serialize");
        assert_eq!(json!({
            "id": "ad8b59c2-5fe6-4267-b0cf-6d2f9eb1c812",
            "title": "The Hobbit",
            "authors": "J.R.R. Tolkien",
            "publisher": "Allen & Unwin",
            "pages": 310,
            "isbn": "978-0547928227",
        }), val);
    }

    #[tokio::test]
    async fn test_should_default_missing_create_fields() {
        let dto: NewBookDto = serde_json::from_str(r#"{"title": "The Hobbit"}"#).expect("should parse");
        assert_eq!("The Hobbit", dto.title.as_str());
        assert_eq!("", dto.authors.as_str());
        assert_eq!(0, dto.pages);

        let list = BookListDto::from(Vec::<Book>::new().as_slice());
        assert_eq!(r#"{"books":[]}"#, serde_json::to_string(&list).expect("should serialize"));
    }

    #[tokio::test]
    async fn test_should_reject_malformed_stored_records() {
        let mut dto = BookDto {
            id: "not-a-uuid".to_string(),
            title: "title".to_string(),
            authors: "authors".to_string(),
            publisher: "publisher".to_string(),
            pages: 10,
            isbn: "isbn".to_string(),
        };
        assert!(matches!(Book::try_from(dto.clone()), Err(LibraryError::Serialization { .. })));

        dto.id = Uuid::new_v4().to_string();
        dto.pages = -1;
        assert!(matches!(Book::try_from(dto.clone()), Err(LibraryError::Serialization { .. })));

        dto.pages = 10;
        let book = Book::try_from(dto.clone()).expect("should convert");
        assert_eq!(dto, BookDto::from(&book));
    }
}
