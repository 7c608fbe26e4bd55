//! Pagination utilities for service layer
//!
//! Query strings arrive unvalidated; everything here degrades to defaults
//! instead of failing.

/// Bounds applied to every listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for Limits {
    fn default() -> Self { Self { default_limit: 20, max_limit: 100 } }
}

/// Page-based parameters used by the HTML listing.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to a 0-based page index and page size.
    pub fn normalize(self, limits: Limits) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = (self.per_page as u64).clamp(1, limits.max_limit.max(1));
        ((page - 1) as u64, per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// Normalized offset/limit pair handed to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Largest offset the SQL drivers accept; they bind it as a signed 64-bit value.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
}

impl Window {
    /// Non-numeric or negative values fall back to the defaults; `limit` is
    /// capped at `max_limit` and 0 means "default".
    pub fn from_raw(offset: Option<&str>, limit: Option<&str>, limits: Limits) -> Self {
        let offset = parse_count(offset).unwrap_or(0).min(MAX_OFFSET);
        let limit = match parse_count(limit) {
            Some(0) | None => limits.default_limit,
            Some(n) => n.min(limits.max_limit),
        };
        Self { offset, limit }
    }

    /// 1-based page of `default_limit` rows; unparsable pages mean page 1.
    pub fn from_page(page: Option<&str>, limits: Limits) -> Self {
        let page = parse_count(page).map(|p| p.min(u32::MAX as u64) as u32).unwrap_or(1);
        let per_page = limits.default_limit.min(u32::MAX as u64) as u32;
        let (idx, per) = Pagination { page, per_page }.normalize(limits);
        Self { offset: idx.saturating_mul(per).min(MAX_OFFSET), limit: per }
    }

    /// 1-based page number this window starts on.
    pub fn page(&self) -> u64 {
        if self.limit == 0 { 1 } else { self.offset / self.limit + 1 }
    }
}
