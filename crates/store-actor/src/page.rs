//! # Paged Listing
//!
//! Every store supports ordered, paged listing. A [`PageRequest`] bundles the
//! page number, page size, and a typed sort field; the actor sorts ascending
//! by that field (ties broken by id) and returns the requested slice.
//!
//! Sort fields are per-entity enums implementing [`SortField`], parsed from
//! raw strings with [`PageRequest::from_raw`]. Parsing validates against the
//! entity's known field set, so an unknown field name is rejected before any
//! store call instead of failing deep inside a query.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

/// Default page number when the caller supplies none.
pub const DEFAULT_PAGE_NUMBER: usize = 0;
/// Default page size when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Raised by a sort-field `FromStr` impl when the name is not in the
/// entity's field set. Carries the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortField(pub String);

/// A typed sort field for one entity.
///
/// The `Default` value is the field used when the caller supplies none
/// (conventionally the id). `names()` lists the accepted spellings, used in
/// validation error messages.
pub trait SortField:
    Copy + Default + Eq + Hash + Debug + Send + Sync + FromStr<Err = UnknownSortField> + 'static
{
    /// All accepted field names, in declaration order.
    fn names() -> &'static [&'static str];
}

/// Validation failures for raw paging parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
    #[error("unknown sort field `{field}`, expected one of {allowed:?}")]
    UnknownSortField {
        field: String,
        allowed: &'static [&'static str],
    },
}

/// One page worth of listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest<S> {
    /// Zero-based page number.
    pub number: usize,
    /// Maximum records in the page.
    pub size: usize,
    /// Field to order by, ascending.
    pub sort: S,
}

impl<S: Default> Default for PageRequest<S> {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            sort: S::default(),
        }
    }
}

impl<S: SortField> PageRequest<S> {
    /// Parses raw paging parameters, validating the sort field against the
    /// entity's known set and rejecting a zero page size.
    pub fn from_raw(number: usize, size: usize, sort: &str) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        let sort = sort
            .parse::<S>()
            .map_err(|UnknownSortField(field)| PageRequestError::UnknownSortField {
                field,
                allowed: S::names(),
            })?;
        Ok(Self { number, size, sort })
    }

    /// Index of the first record in this page.
    pub fn offset(&self) -> usize {
        self.number.saturating_mul(self.size)
    }
}
