/// Page selection requested by a client, already normalised.
///
/// `page` is kept as the raw integer the client asked for; clamping needs
/// the total count and happens in [`PageRequest::window`].
/// Largest page size a database `LIMIT` can bind
pub const MAX_ITEMS_PER_PAGE: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub items_per_page: u64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, items_per_page: u64) -> Self {
        Self {
            page,
            items_per_page: items_per_page.clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    /// Build from raw query-string values.
    ///
    /// `page` must parse as an integer to count; `itemsPerPage` replaces the
    /// default only when it is a positive integer.
    pub fn from_query(page: Option<&str>, items_per_page: Option<&str>, default_items: u64) -> Self {
        let page = page.and_then(|p| p.trim().parse::<i64>().ok());
        let items_per_page = items_per_page
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .map(|v| v as u64)
            .unwrap_or(default_items);
        Self::new(page, items_per_page)
    }

    /// Clamp the requested page against `total` matching rows.
    pub fn window(&self, total: u64) -> PageWindow {
        let items_per_page = self.items_per_page;
        let total_pages = total.div_ceil(items_per_page);

        let mut page = match self.page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        };
        if page > total_pages {
            page = total_pages.max(1);
        }

        PageWindow {
            page,
            total_pages,
            items_per_page,
            offset: (page - 1) * items_per_page,
        }
    }
}

/// Resolved page: what to skip, how many to take, what to report back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub total_pages: u64,
    pub items_per_page: u64,
    pub offset: u64,
}

/// Paginated response wrapper
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub items_per_page: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, window: PageWindow) -> Self {
        Self {
            items,
            total,
            page: window.page,
            items_per_page: window.items_per_page,
            total_pages: window.total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            items_per_page: self.items_per_page,
            total_pages: self.total_pages,
        }
    }
}
