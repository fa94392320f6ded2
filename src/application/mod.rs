//! Application layer: alias allocation and service orchestration.

pub mod alias_allocator;
pub mod services;

pub use alias_allocator::AliasAllocator;
