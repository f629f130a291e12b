//! Storage layer - data sources and persistent backends

pub mod cache;
pub mod json_file;
pub mod memory;

pub use cache::CachedDataSource;
pub use json_file::JsonFileBackend;
pub use memory::InMemoryDataSource;
