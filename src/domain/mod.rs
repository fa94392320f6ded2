//! Domain layer: core entities and repository traits.
//!
//! The durable store owns the authoritative copy of [`entities::Link`] and
//! [`entities::Visit`]. [`entities::Summary`] is a derived projection that
//! only ever lives in the cache and is recomputed from the visit log.

pub mod entities;
pub mod repositories;
