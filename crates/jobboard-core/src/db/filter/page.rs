use crate::{DEFAULT_PAGE_LIMIT, db::filter::ValidationError};
use serde::{Deserialize, Serialize};

///
/// PageRequest
///
/// Raw pagination hint from the caller. Both parts are optional; the
/// limit is signed so non-positive requests can be rejected rather than
/// wrapped.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageRequest {
    pub offset: Option<u64>,
    pub limit: Option<i64>,
}

impl PageRequest {
    #[must_use]
    pub const fn new(offset: u64, limit: i64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// First page of `limit` rows.
    #[must_use]
    pub const fn first(limit: i64) -> Self {
        Self::new(0, limit)
    }

    /// Validate into a window; an absent limit falls back to `default_limit`.
    pub fn resolve(self, default_limit: u32) -> Result<PageWindow, ValidationError> {
        let offset = self.offset.unwrap_or(0);
        let Some(limit) = self.limit else {
            return Ok(PageWindow::new(offset, default_limit.max(1)));
        };

        if limit <= 0 {
            return Err(ValidationError::InvalidLimit { limit });
        }

        let limit = u32::try_from(limit).unwrap_or(u32::MAX);

        Ok(PageWindow::new(offset, limit))
    }
}

///
/// PageWindow
///
/// Validated offset/limit pair. `limit` is always positive; the executor
/// clamps it to the configured maximum.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PageWindow {
    offset: u64,
    limit: u32,
}

impl PageWindow {
    /// Window with a positive limit; zero is `InvalidLimit`.
    pub const fn try_new(offset: u64, limit: u32) -> Result<Self, ValidationError> {
        if limit == 0 {
            return Err(ValidationError::InvalidLimit { limit: 0 });
        }

        Ok(Self { offset, limit })
    }

    // Callers guarantee `limit > 0`.
    pub(crate) const fn new(offset: u64, limit: u32) -> Self {
        debug_assert!(limit > 0, "page window limit must be positive");

        Self { offset, limit }
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Silently cap the limit; the limit is a hint, not a correctness input.
    #[must_use]
    pub const fn clamped(self, max_limit: u32) -> Self {
        let limit = if self.limit > max_limit {
            max_limit
        } else {
            self.limit
        };

        Self {
            offset: self.offset,
            limit,
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}
