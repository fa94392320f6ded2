//! API layer: REST handlers, DTOs, and client attribute derivation.

pub mod client_info;
pub mod dto;
pub mod handlers;
