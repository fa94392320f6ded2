//! Shared utilities.

pub mod alias;
