//! # Pagination
//!
//! Page arithmetic for long listings such as the help output.

use crate::domain::errors::CommandError;
use crate::strings::messages;

pub const PAGE_SIZE: usize = 10;

/// One rendered page of a listing. `number` is 1-based.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub number: usize,
    pub total: usize,
    pub items: &'a [T],
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total
    }
}

/// Parses an optional page argument.
///
/// Absent, zero or negative values select page 1; anything that is not an integer is a
/// validation error.
pub fn requested_page(arg: Option<&str>) -> Result<usize, CommandError> {
    let Some(raw) = arg else {
        return Ok(1);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| CommandError::Validation(messages::INVALID_HELP_PAGE.to_string()))?;
    if value <= 0 {
        return Ok(1);
    }
    usize::try_from(value)
        .map_err(|_| CommandError::Validation(messages::INVALID_HELP_PAGE.to_string()))
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

/// Slices `items[(page-1)*size .. min(page*size, len)]`, or reports the valid range.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Result<Page<'_, T>, CommandError> {
    let total = total_pages(items.len(), page_size);
    if page == 0 || page > total {
        return Err(CommandError::OutOfRange { max: total });
    }
    let start = (page - 1) * page_size;
    let end = (page * page_size).min(items.len());
    Ok(Page {
        number: page,
        total,
        items: &items[start..end],
    })
}
