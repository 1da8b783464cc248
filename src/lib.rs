//! Book catalog service: a small CRUD core over a pluggable storage backend,
//! exposed as AWS Lambda functions behind an HTTP API gateway.

pub mod books;
pub mod catalog;
pub mod core;
pub mod utils;
