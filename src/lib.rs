pub mod arlington;
pub mod config;
pub mod patc;
pub mod schema;
pub mod text;
pub mod tracing;
