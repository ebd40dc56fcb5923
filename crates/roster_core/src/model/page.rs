//! Page request, sort descriptors and the paged result envelope.
//!
//! # Invariants
//! - `PageRequest::limit` is always in `1..=MAX_PAGE_LIMIT`.
//! - `Page::total >= Page::content.len()`.
//! - A page that is not the last one is full.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound accepted for a single page.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Rejected page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequestError {
    ZeroLimit,
    LimitTooLarge { limit: u32, max: u32 },
}

impl Display for PageRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroLimit => write!(f, "page limit must be at least 1"),
            Self::LimitTooLarge { limit, max } => {
                write!(f, "page limit {limit} exceeds maximum {max}")
            }
        }
    }
}

impl Error for PageRequestError {}

/// Column a search can be ordered by.
///
/// Closed set so sort input never reaches SQL as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    MemberId,
    Username,
    Age,
    TeamName,
}

impl SortKey {
    /// Parses `member_id|username|age|team_name` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "member_id" | "id" => Some(Self::MemberId),
            "username" => Some(Self::Username),
            "age" => Some(Self::Age),
            "team_name" => Some(Self::TeamName),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Placement of `NULL` values; `StoreDefault` leaves it to SQLite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrdering {
    #[default]
    StoreDefault,
    NullsFirst,
    NullsLast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
    pub nulls: NullOrdering,
}

impl SortOrder {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
            nulls: NullOrdering::StoreDefault,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
            nulls: NullOrdering::StoreDefault,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::NullsFirst;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::NullsLast;
        self
    }
}

/// Ordered list of sort keys. Empty means store-defined order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    /// No explicit order; result order is whatever the store returns.
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(order: SortOrder) -> Self {
        Self {
            orders: vec![order],
        }
    }

    pub fn then(mut self, order: SortOrder) -> Self {
        self.orders.push(order);
        self
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Caller-supplied page geometry plus optional explicit sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    offset: u64,
    limit: u32,
    sort: Sort,
}

impl PageRequest {
    /// Builds an unsorted request for rows `offset..offset + limit`.
    ///
    /// # Errors
    /// - `ZeroLimit` when `limit == 0`.
    /// - `LimitTooLarge` when `limit > MAX_PAGE_LIMIT`.
    pub fn new(offset: u64, limit: u32) -> Result<Self, PageRequestError> {
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(PageRequestError::LimitTooLarge {
                limit,
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(Self {
            offset,
            limit,
            sort: Sort::unsorted(),
        })
    }

    /// Builds a request for zero-based page `page_number` of `page_size` rows.
    pub fn of(page_number: u64, page_size: u32) -> Result<Self, PageRequestError> {
        let offset = page_number.saturating_mul(u64::from(page_size));
        Self::new(offset, page_size)
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Zero-based page index this request points at.
    pub fn page_number(&self) -> u64 {
        self.offset / u64::from(self.limit)
    }
}

/// Bounded slice of matching rows plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            content,
            total,
            request,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages of `request.limit()` rows needed to cover `total`.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.request.limit()))
    }

    pub fn has_next(&self) -> bool {
        self.request.offset() + (self.content.len() as u64) < self.total
    }

    pub fn is_first(&self) -> bool {
        self.request.offset() == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }
}
