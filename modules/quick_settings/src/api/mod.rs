//! API layer - clients over the domain service

pub mod native;
