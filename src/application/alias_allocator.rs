//! Alias allocation: validation of requested aliases and collision-checked
//! generation of random ones.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::alias::generate_alias;
use tracing::debug;

/// Allocates a unique alias for a new link.
///
/// Uniqueness checks go to the durable store and never the cache: a stale
/// cached miss just before a collision would allow double-allocation, so
/// only the store's answer counts. Random generation with store-verified
/// uniqueness needs no coordination state, which keeps the design
/// horizontally scalable.
pub struct AliasAllocator {
    repo: Arc<dyn LinkRepository>,
    max_attempts: u32,
}

impl AliasAllocator {
    /// Creates an allocator with a bounded generation attempt budget.
    pub fn new(repo: Arc<dyn LinkRepository>, max_attempts: u32) -> Self {
        Self { repo, max_attempts }
    }

    /// Returns a free alias: the requested one if provided and unused,
    /// otherwise a freshly generated one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasConflict`] if the requested alias is taken.
    /// Returns [`AppError::AliasSpaceExhausted`] if generation fails to find
    /// a free alias within the attempt budget.
    /// Returns [`AppError::Store`] on lookup failures.
    pub async fn allocate(&self, requested: Option<&str>) -> Result<String, AppError> {
        if let Some(alias) = requested.filter(|a| !a.is_empty()) {
            return match self.repo.find_by_alias(alias).await? {
                Some(_) => Err(AppError::AliasConflict(alias.to_string())),
                None => Ok(alias.to_string()),
            };
        }

        for _ in 0..self.max_attempts {
            let candidate = generate_alias();

            if self.repo.find_by_alias(&candidate).await?.is_none() {
                return Ok(candidate);
            }

            debug!(alias = %candidate, "alias collision, regenerating");
        }

        Err(AppError::AliasSpaceExhausted(self.max_attempts))
    }
}
