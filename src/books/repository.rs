pub mod ddb_book_repository;
pub mod memory_book_repository;

use crate::books::domain::Book;
use crate::core::repository::Repository;

pub type BookRepository = dyn Repository<Book>;
