//! Offset pagination for list requests.

use crate::{Error, Result};

/// Rows returned when a list request names no limit.
pub const DEFAULT_LIMIT: u64 = 100;

/// Largest page a single list request returns. Larger limits are clamped.
pub const MAX_LIMIT: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows to skip
    pub skip: u64,

    /// Rows to return, between 1 and [`MAX_LIMIT`]
    pub limit: u64,
}

impl Page {
    /// Validates a requested page.
    ///
    /// A zero limit is rejected; limits above [`MAX_LIMIT`] are clamped.
    pub fn new(skip: u64, limit: u64) -> Result<Page> {
        if limit == 0 {
            return Err(Error::invalid_pagination(
                "limit must be greater than zero",
            ));
        }

        Ok(Page {
            skip,
            limit: limit.min(MAX_LIMIT),
        })
    }

    /// Builds a page from optional query parameters.
    pub fn from_query(skip: Option<u64>, limit: Option<u64>) -> Result<Page> {
        Page::new(skip.unwrap_or(0), limit.unwrap_or(DEFAULT_LIMIT))
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
