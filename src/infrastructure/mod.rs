//! Infrastructure layer: database repositories and cache adapters.

pub mod cache;
pub mod persistence;
