pub mod model;

pub use model::{Book, NewBook};
