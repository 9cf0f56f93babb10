//! This modules defines the common functionality for paging lists of records.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::{CategoryId, CategoryType},
    stores::TransactionFilter,
};

/// The page size used when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// The largest page size a request may ask for.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Query parameters for listing incomes or expenses.
///
/// Either end of the date range may be omitted. `source` only applies to
/// incomes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub category_id: Option<CategoryId>,
    pub category_type: Option<CategoryType>,
    pub source: Option<String>,
}

impl ListQuery {
    /// The 1-based page number and page size.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the page is zero or the page size is
    /// outside `1..=MAX_PAGE_SIZE`.
    pub fn page_and_limit(&self) -> Result<(u64, u64), Error> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(Error::validation("page", "must be at least 1"));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(Error::validation(
                "limit",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        Ok((page, limit))
    }

    /// The records the query asks for, ignoring paging.
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            date_range: date_range(self.start_date, self.end_date),
            category_id: self.category_id,
            category_type: self.category_type,
            source: self
                .source
                .as_deref()
                .map(str::trim)
                .filter(|source| !source.is_empty())
                .map(str::to_owned),
        }
    }
}

/// The range between `start` and `end`, or `None` if neither end was given.
pub fn date_range(start: Option<Date>, end: Option<Date>) -> Option<RangeInclusive<Date>> {
    match (start, end) {
        (None, None) => None,
        (start, end) => Some(start.unwrap_or(Date::MIN)..=end.unwrap_or(Date::MAX)),
    }
}

/// Where a page sits in the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PageInfo {
    /// Describe page `page` of `limit` records out of `total`.
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// A page of records and where it sits in the full list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
