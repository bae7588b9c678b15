//! Common list query parameters.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 10;

/// Search and pagination options accepted by fetch-many operations.
///
/// `q` is opaque to the core and passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub q: Option<String>,
    pub skip: u32,
    pub limit: u32,
}

impl QueryParams {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            q: None,
            skip,
            limit,
        }
    }

    /// Same defaults with a caller-configured page size.
    pub fn with_default_limit(limit: u32) -> Self {
        Self::new(0, limit)
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}
