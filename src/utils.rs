pub mod ddb;
pub mod logs;
pub mod validation;
