//! Page/limit arithmetic shared by every paginated listing.

use serde::Serialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A normalized page request. Always `page >= 1` and `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Builds a request from already-parsed numbers, clamping both into range.
    pub fn new(page: i64, limit: i64) -> Self {
        let page = page.clamp(1, u32::MAX as i64) as u32;
        let limit = limit.clamp(1, MAX_PAGE_SIZE as i64) as u32;
        Self { page, limit }
    }

    /// Builds a request from raw query-string values.
    ///
    /// Each value is read as its leading integer (`"50abc"` is 50, `"abc"`
    /// and `""` are 0) and then clamped. Only an absent `limit` gets the
    /// default.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.map(leading_int).unwrap_or(1);
        let limit = limit
            .map(leading_int)
            .unwrap_or(DEFAULT_PAGE_SIZE as i64);
        Self::new(page, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Row offset for `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

/// Optional sign and digits after leading whitespace; saturates on overflow.
fn leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add((d - b'0') as i64)
        });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}

/// Pagination block returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let limit = request.limit() as i64;
        let pages = (total + limit - 1) / limit;
        let page = request.page();

        Self {
            page,
            limit: request.limit(),
            total,
            pages,
            has_next: (page as i64) < pages,
            has_prev: page > 1,
        }
    }
}

/// A page of items together with its pagination block.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            info: PageInfo::new(request, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}
