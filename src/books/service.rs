use thiserror::Error;

use crate::catalog::record::{BookRecord, DEFAULT_WORD_ESTIMATE};

/// Page size, matching the remote listing's own pagination unit.
pub const DEFAULT_PER_PAGE: usize = 25;

/// At most this many books per compiled document.
pub const MAX_SELECTION: usize = 10;

/// Aggregate estimated-word budget across one selection.
pub const WORD_BUDGET: u64 = 10_000;

/// One page of the catalog plus navigation flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub books: Vec<BookRecord>,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slice the catalog into 1-indexed pages. Out-of-range pages are not an
/// error: slicing beyond the ends simply yields an empty page.
pub fn paginate(records: &[BookRecord], page: i64, per_page: usize) -> CatalogPage {
    let total_count = records.len();
    let total_pages = total_count.div_ceil(per_page);

    let books = if page >= 1 {
        let start = (page as usize - 1).saturating_mul(per_page);
        records
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    CatalogPage {
        books,
        total_pages,
        has_next: page < total_pages as i64,
        has_prev: page > 1,
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No books selected")]
    Empty,

    #[error("Maximum {MAX_SELECTION} books allowed")]
    TooMany,

    #[error("Total estimated words ({}) exceeds 10,000 limit", format_thousands(*.total))]
    WordBudgetExceeded { total: u64 },
}

/// A selection that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSelection {
    pub book_count: usize,
    pub estimated_words: u64,
}

/// Validate a selection against the count and word-budget limits using only
/// the estimate field already present on cached records. Never touches the
/// network; ids absent from the snapshot count at the placeholder estimate.
pub fn validate_selection(
    records: &[BookRecord],
    ids: &[String],
) -> Result<ValidSelection, SelectionError> {
    if ids.is_empty() {
        return Err(SelectionError::Empty);
    }
    if ids.len() > MAX_SELECTION {
        return Err(SelectionError::TooMany);
    }

    let total: u64 = ids
        .iter()
        .map(|id| {
            records
                .iter()
                .find(|record| record.id == *id)
                .map(|record| record.estimated_words)
                .unwrap_or(DEFAULT_WORD_ESTIMATE)
        })
        .sum();

    if total > WORD_BUDGET {
        return Err(SelectionError::WordBudgetExceeded { total });
    }

    Ok(ValidSelection {
        book_count: ids.len(),
        estimated_words: total,
    })
}

/// Thousands-separated decimal rendering, e.g. 15000 -> "15,000".
fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
