//! DTOs for the REST endpoints.

use serde::Deserialize;
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional requested alias. When absent or empty, a random alias is
    /// generated.
    pub alias: Option<String>,
}
