//! Random alias generation.
//!
//! Aliases are fixed-length strings drawn uniformly from the mixed-case
//! alphanumeric alphabet. 62^6 candidates make collisions negligible at
//! expected scale; the allocator absorbs the rare collision by regenerating.

use rand::{Rng, distr::Alphanumeric, rng};

/// Length of generated aliases.
pub const ALIAS_LENGTH: usize = 6;

/// Generates a random alias of [`ALIAS_LENGTH`] alphanumeric characters.
pub fn generate_alias() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(ALIAS_LENGTH)
        .map(char::from)
        .collect()
}
