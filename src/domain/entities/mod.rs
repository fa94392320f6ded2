//! Domain entities.

mod link;
mod summary;
mod visit;

pub use link::{Link, NewLink};
pub use summary::Summary;
pub use visit::{NewVisit, Visit};
