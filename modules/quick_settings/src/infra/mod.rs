//! Infrastructure layer - concrete data sources and backends

pub mod storage;
